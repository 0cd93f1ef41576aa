//! Control type definitions.
//!
//! A [`ControlDef`] describes a physical control type (joystick, spinner,
//! trackball, ...). Controls reference their definition by [`ControlType`];
//! the built-in registry holds one definition per type for the lifetime of
//! the program.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::codec::enums::{StringEnum, string_enum};

string_enum! {
    /// Kind of physical control.
    pub enum ControlType {
        Joy2WayHorizontal = ("JOY_2WAY_HORIZONTAL", "joy-2way-horizontal"),
        Joy2WayVertical = ("JOY_2WAY_VERTICAL", "joy-2way-vertical"),
        Joy2WayVerticalTrigger = ("JOY_2WAY_VERTICAL_TRIGGER", "joy-2way-vertical-trigger"),
        Joy4Way = ("JOY_4WAY", "joy-4way"),
        Joy4WayDiagonal = ("JOY_4WAY_DIAGONAL", "joy-4way-diagonal"),
        Joy4WayTrigger = ("JOY_4WAY_TRIGGER", "joy-4way-trigger"),
        Joy8Way = ("JOY_8WAY", "joy-8way"),
        Joy8WayTrigger = ("JOY_8WAY_TRIGGER", "joy-8way-trigger"),
        Joy8WayTopfire = ("JOY_8WAY_TOPFIRE", "joy-8way-topfire"),
        Joy8WayRotaryOptical = ("JOY_8WAY_ROTARY_OPTICAL", "joy-8way-rotary-optical"),
        Joy8WayRotaryMechanical = ("JOY_8WAY_ROTARY_MECHANICAL", "joy-8way-rotary-mechanical"),
        Joy49Way = ("JOY_49WAY", "joy-49way"),
        JoyAnalog = ("JOY_ANALOG", "joy-analog"),
        JoyAnalogFlightstick = ("JOY_ANALOG_FLIGHTSTICK", "joy-analog-flightstick"),
        DirectionalButtons2WayHorizontal = ("DIRECTIONALBUTTONS_2WAY_HORIZONTAL", "directionalbuttons-2way-horizontal"),
        DirectionalButtons2WayVertical = ("DIRECTIONALBUTTONS_2WAY_VERTICAL", "directionalbuttons-2way-vertical"),
        DirectionalButtons4Way = ("DIRECTIONALBUTTONS_4WAY", "directionalbuttons-4way"),
        JoyAnalogYoke = ("JOY_ANALOG_YOKE", "joy-analog-yoke"),
        Throttle = ("THROTTLE", "throttle"),
        Trackball = ("TRACKBALL", "trackball"),
        RollerHorizontal = ("ROLLER_HORIZONTAL", "roller-horizontal"),
        RollerVertical = ("ROLLER_VERTICAL", "roller-vertical"),
        Spinner = ("SPINNER", "spinner"),
        SpinnerPushPull = ("SPINNER_PUSHPULL", "spinner-pushpull"),
        Paddle = ("PADDLE", "paddle"),
        SteeringWheel360 = ("STEERINGWHEEL_360", "steeringwheel-360"),
        SteeringWheel270 = ("STEERINGWHEEL_270", "steeringwheel-270"),
        PedalDigital = ("PEDAL_DIGITAL", "pedal-digital"),
        PedalAnalog = ("PEDAL_ANALOG", "pedal-analog"),
        ShifterHighLow = ("SHIFTER_HIGHLOW", "shifter-highlow"),
        ShifterUpDown = ("SHIFTER_UPDOWN", "shifter-updown"),
        Shifter4Gear = ("SHIFTER_4GEAR", "shifter-4gear"),
        Lightgun = ("LIGHTGUN", "lightgun"),
        LightgunAnalog = ("LIGHTGUN_ANALOG", "lightgun-analog"),
        Handlebars = ("HANDLEBARS", "handlebars"),
        Turntable = ("TURNTABLE", "turntable"),
        BaseballPitcher = ("BASEBALLPITCHER", "baseballpitcher"),
        BatterControl = ("BATTERCONTROL", "battercontrol"),
        FootballKicker = ("FOOTBALLKICKER", "footballkicker"),
        TriviaButtons = ("TRIVIABUTTONS", "triviabuttons"),
        MahjongCp = ("MAHJONGCP", "mahjongcp"),
        Misc = ("MISC", "misc"),
    }
}

impl ControlType {
    /// Looks up a member by its compact token, the canonical token with the
    /// hyphens removed (`joy8way` for `joy-8way`).
    pub fn from_compact_token(token: &str) -> Option<Self> {
        if token.contains('-') {
            return None;
        }
        Self::values()
            .iter()
            .copied()
            .find(|t| t.token().chars().filter(|c| *c != '-').eq(token.chars()))
    }
}

string_enum! {
    /// How well a fallback control substitutes for the original.
    pub enum ControlDefFallbackLevel {
        Good = ("GOOD", "good"),
        Ok = ("OK", "ok"),
        Bad = ("BAD", "bad"),
    }
}

/// One output (axis or switch) of a control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlDefOutput {
    pub name: Option<String>,
    pub is_analog: bool,
    pub default_mame_input_port_suffix: String,
    pub default_label: Option<String>,
    pub neg_default_label: Option<String>,
    pub pos_default_label: Option<String>,
}

/// A control type that can stand in for another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDefFallback {
    pub control_type: ControlType,
    pub level: ControlDefFallbackLevel,
    /// Output name → output name(s) on the fallback control.
    pub output_mapping: FxHashMap<String, Vec<String>>,
    /// Button descriptor → descriptor(s) on the fallback control.
    pub button_descriptor_mapping: FxHashMap<String, Vec<String>>,
}

/// Definition of a control type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDef {
    pub control_type: ControlType,
    pub name: String,
    pub description: String,
    pub output_map: FxHashMap<String, ControlDefOutput>,
    pub descriptors: Vec<String>,
    pub button_descriptors: Vec<String>,
    pub fallbacks: Vec<ControlDefFallback>,
}

impl ControlDef {
    /// Creates a definition with no outputs, descriptors or fallbacks.
    pub fn new(
        control_type: ControlType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            control_type,
            name: name.into(),
            description: description.into(),
            output_map: FxHashMap::default(),
            descriptors: Vec::new(),
            button_descriptors: Vec::new(),
            fallbacks: Vec::new(),
        }
    }
}

/// Control definitions keyed by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlDefRegistry {
    defs: FxHashMap<ControlType, ControlDef>,
}

impl ControlDefRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any previous one for the same type.
    pub fn insert(&mut self, def: ControlDef) {
        self.defs.insert(def.control_type, def);
    }

    pub fn get_by_type(&self, control_type: ControlType) -> Option<&ControlDef> {
        self.defs.get(&control_type)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in [`ControlType`] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlDef> {
        ControlType::values()
            .iter()
            .filter_map(|t| self.defs.get(t))
    }

    /// Types with no definition in this registry.
    pub fn missing_types(&self) -> Vec<ControlType> {
        ControlType::values()
            .iter()
            .copied()
            .filter(|t| !self.defs.contains_key(t))
            .collect()
    }
}

const BUILTIN_DEFS: &[(ControlType, &str, &str)] = &[
    (ControlType::Joy2WayHorizontal, "2-Way Joystick (Horizontal)", "Joystick restricted to left and right."),
    (ControlType::Joy2WayVertical, "2-Way Joystick (Vertical)", "Joystick restricted to up and down."),
    (ControlType::Joy2WayVerticalTrigger, "2-Way Joystick (Vertical) with Trigger", "Up/down joystick with a trigger on the handle."),
    (ControlType::Joy4Way, "4-Way Joystick", "Joystick with four orthogonal directions."),
    (ControlType::Joy4WayDiagonal, "4-Way Diagonal Joystick", "Joystick with four diagonal directions."),
    (ControlType::Joy4WayTrigger, "4-Way Joystick with Trigger", "4-way joystick with a trigger on the handle."),
    (ControlType::Joy8Way, "8-Way Joystick", "Joystick with eight directions."),
    (ControlType::Joy8WayTrigger, "8-Way Joystick with Trigger", "8-way joystick with a trigger on the handle."),
    (ControlType::Joy8WayTopfire, "8-Way Joystick with Top-Fire", "8-way joystick with a button on top of the handle."),
    (ControlType::Joy8WayRotaryOptical, "Optical Rotary Joystick", "8-way joystick whose handle rotates, read optically."),
    (ControlType::Joy8WayRotaryMechanical, "Mechanical Rotary Joystick", "8-way joystick whose handle rotates in 12 steps."),
    (ControlType::Joy49Way, "49-Way Joystick", "Joystick with a 7x7 grid of positions."),
    (ControlType::JoyAnalog, "Analog Joystick", "Proportional two-axis joystick."),
    (ControlType::JoyAnalogFlightstick, "Analog Flightstick", "Proportional flight stick with handle buttons."),
    (ControlType::DirectionalButtons2WayHorizontal, "2-Way Directional Buttons (Horizontal)", "Left and right buttons."),
    (ControlType::DirectionalButtons2WayVertical, "2-Way Directional Buttons (Vertical)", "Up and down buttons."),
    (ControlType::DirectionalButtons4Way, "4-Way Directional Buttons", "Up, down, left and right buttons."),
    (ControlType::JoyAnalogYoke, "Analog Yoke", "Proportional flight yoke."),
    (ControlType::Throttle, "Throttle", "Proportional single-axis throttle lever."),
    (ControlType::Trackball, "Trackball", "Free-spinning ball read on two axes."),
    (ControlType::RollerHorizontal, "Horizontal Roller", "Cylinder rolled left and right."),
    (ControlType::RollerVertical, "Vertical Roller", "Cylinder rolled up and down."),
    (ControlType::Spinner, "Spinner", "Free-spinning knob."),
    (ControlType::SpinnerPushPull, "Push/Pull Spinner", "Spinner that can also be pushed and pulled."),
    (ControlType::Paddle, "Paddle", "Knob with limited rotation."),
    (ControlType::SteeringWheel360, "360 Steering Wheel", "Steering wheel with unlimited rotation."),
    (ControlType::SteeringWheel270, "270 Steering Wheel", "Steering wheel with limited, self-centering rotation."),
    (ControlType::PedalDigital, "Digital Pedal", "On/off foot pedal."),
    (ControlType::PedalAnalog, "Analog Pedal", "Proportional foot pedal."),
    (ControlType::ShifterHighLow, "High/Low Shifter", "Two-position gear shifter."),
    (ControlType::ShifterUpDown, "Up/Down Shifter", "Sequential gear shifter."),
    (ControlType::Shifter4Gear, "4-Gear Shifter", "H-pattern four-gear shifter."),
    (ControlType::Lightgun, "Lightgun", "Gun aimed at the screen."),
    (ControlType::LightgunAnalog, "Analog Lightgun", "Positional gun read on two axes."),
    (ControlType::Handlebars, "Handlebars", "Motorcycle-style handlebars."),
    (ControlType::Turntable, "Turntable", "DJ-style turntable."),
    (ControlType::BaseballPitcher, "Baseball Pitcher", "Dedicated pitching control."),
    (ControlType::BatterControl, "Batter Control", "Dedicated batting control."),
    (ControlType::FootballKicker, "Football Kicker", "Dedicated kicking control."),
    (ControlType::TriviaButtons, "Trivia Buttons", "Bank of answer buttons."),
    (ControlType::MahjongCp, "Mahjong Control Panel", "Mahjong tile selection keyboard."),
    (ControlType::Misc, "Miscellaneous", "Control not covered by any other type."),
];

lazy_static! {
    static ref BUILTIN_REGISTRY: ControlDefRegistry = {
        let mut registry = ControlDefRegistry::new();
        for (control_type, name, description) in BUILTIN_DEFS {
            registry.insert(ControlDef::new(*control_type, *name, *description));
        }
        registry
    };
}

/// Returns the built-in registry, which has a definition for every
/// [`ControlType`].
pub fn builtin_registry() -> &'static ControlDefRegistry {
    &BUILTIN_REGISTRY
}

/// Resolves a control type against the built-in registry.
pub fn builtin_def(control_type: ControlType) -> Option<&'static ControlDef> {
    BUILTIN_REGISTRY.get_by_type(control_type)
}
