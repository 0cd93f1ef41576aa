//! Decoded state of any kind, and its printable summary.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use arcade_state::codec::StringEnum;
use arcade_state::model::group_item_name;
use arcade_state::{
    Configuration, CpDesignerGroupState, CpDesignerState, DecodeError, GameOverrideManagerState,
    MonitorDesignerGroupState, MonitorDesignerState, NameListState, StateCodec,
};

use crate::StateKind;

/// A decoded component state.
#[derive(Debug)]
pub enum LoadedState {
    CpDesigner(CpDesignerState),
    CpDesignerGroup(CpDesignerGroupState),
    MonitorDesigner(MonitorDesignerState),
    MonitorDesignerGroup(MonitorDesignerGroupState),
    NameList(NameListState),
    GameOverrideManager(GameOverrideManagerState),
}

impl LoadedState {
    pub fn decode(kind: StateKind, value: &Value, label: &str) -> Result<Self, DecodeError> {
        Ok(match kind {
            StateKind::CpDesigner => Self::CpDesigner(StateCodec::decode(value, label)?),
            StateKind::CpDesignerGroup => Self::CpDesignerGroup(StateCodec::decode(value, label)?),
            StateKind::MonitorDesigner => Self::MonitorDesigner(StateCodec::decode(value, label)?),
            StateKind::MonitorDesignerGroup => {
                Self::MonitorDesignerGroup(StateCodec::decode(value, label)?)
            }
            StateKind::GameNameList | StateKind::MachineNameList => {
                Self::NameList(StateCodec::decode(value, label)?)
            }
            StateKind::GameOverrideManager => {
                Self::GameOverrideManager(StateCodec::decode(value, label)?)
            }
        })
    }

    pub fn encode(&self) -> Value {
        match self {
            Self::CpDesigner(s) => s.encode(),
            Self::CpDesignerGroup(s) => s.encode(),
            Self::MonitorDesigner(s) => s.encode(),
            Self::MonitorDesignerGroup(s) => s.encode(),
            Self::NameList(s) => s.encode(),
            Self::GameOverrideManager(s) => s.encode(),
        }
    }

    pub fn summary(&self) -> StateSummary {
        match self {
            Self::CpDesigner(s) => StateSummary::CpDesigner(ConfigurationSummary::new(&s.cp_config)),
            Self::CpDesignerGroup(s) => StateSummary::DesignerGroup {
                members: group_members(&s.designer_ids),
            },
            Self::MonitorDesignerGroup(s) => StateSummary::DesignerGroup {
                members: group_members(&s.designer_ids),
            },
            Self::MonitorDesigner(s) => {
                let m = &s.modeline_config;
                StateSummary::MonitorDesigner {
                    preset: m.preset.clone(),
                    orientation: m.orientation.label(),
                    ranges: m.ranges.clone(),
                    allow_interlaced: m.allow_interlaced,
                    allow_doublescan: m.allow_doublescan,
                }
            }
            Self::NameList(s) => StateSummary::NameList {
                names: s.parse_names(),
            },
            Self::GameOverrideManager(_) => StateSummary::GameOverrideManager,
        }
    }
}

fn group_members(ids: &[String]) -> Vec<GroupMember> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| GroupMember {
            name: group_item_name(i),
            id: id.clone(),
        })
        .collect()
}

#[derive(Serialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateSummary {
    CpDesigner(ConfigurationSummary),
    DesignerGroup {
        members: Vec<GroupMember>,
    },
    MonitorDesigner {
        preset: String,
        orientation: &'static str,
        ranges: Vec<String>,
        allow_interlaced: bool,
        allow_doublescan: bool,
    },
    NameList {
        names: Vec<String>,
    },
    GameOverrideManager,
}

#[derive(Serialize, Debug)]
pub struct GroupMember {
    name: String,
    id: String,
}

#[derive(Serialize, Debug)]
pub struct ConfigurationSummary {
    controls: Vec<ControlSummary>,
    button_clusters: Vec<ButtonClusterSummary>,
    control_sets: Vec<ControlSetSummary>,
    total_buttons: u64,
}

#[derive(Serialize, Debug)]
struct ControlSummary {
    id: String,
    name: String,
    control_type: &'static str,
    num_buttons: u32,
    is_on_opposite_screen_side: bool,
}

#[derive(Serialize, Debug)]
struct ButtonClusterSummary {
    id: String,
    name: String,
    num_buttons: u32,
    is_on_opposite_screen_side: bool,
}

#[derive(Serialize, Debug)]
struct ControlSetSummary {
    control_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    button_cluster_id: Option<String>,
}

impl ConfigurationSummary {
    fn new(config: &Configuration) -> Self {
        Self {
            controls: config
                .controls()
                .iter()
                .map(|c| ControlSummary {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    control_type: c.control_type().label(),
                    num_buttons: c.num_buttons,
                    is_on_opposite_screen_side: c.is_on_opposite_screen_side,
                })
                .collect(),
            button_clusters: config
                .button_clusters()
                .iter()
                .map(|b| ButtonClusterSummary {
                    id: b.id.clone(),
                    name: b.name.clone(),
                    num_buttons: b.num_buttons,
                    is_on_opposite_screen_side: b.is_on_opposite_screen_side,
                })
                .collect(),
            control_sets: config
                .control_sets()
                .iter()
                .map(|set| ControlSetSummary {
                    control_ids: config.set_controls(set).map(|c| c.id.clone()).collect(),
                    button_cluster_id: config.set_button_cluster(set).map(|b| b.id.clone()),
                })
                .collect(),
            total_buttons: config.total_buttons(),
        }
    }
}

impl fmt::Display for StateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateSummary::CpDesigner(config) => {
                writeln!(f, "Controls ({}):", config.controls.len())?;
                for c in &config.controls {
                    let side = if c.is_on_opposite_screen_side { " [opposite side]" } else { "" };
                    writeln!(
                        f,
                        "  {} {:?} {} buttons={}{}",
                        c.id, c.name, c.control_type, c.num_buttons, side
                    )?;
                }
                writeln!(f, "Button clusters ({}):", config.button_clusters.len())?;
                for b in &config.button_clusters {
                    writeln!(f, "  {} {:?} buttons={}", b.id, b.name, b.num_buttons)?;
                }
                writeln!(f, "Control sets ({}):", config.control_sets.len())?;
                for (i, set) in config.control_sets.iter().enumerate() {
                    write!(f, "  #{i}: {}", set.control_ids.join(", "))?;
                    if let Some(id) = &set.button_cluster_id {
                        write!(f, " + {id}")?;
                    }
                    writeln!(f)?;
                }
                write!(f, "Total buttons: {}", config.total_buttons)
            }
            StateSummary::DesignerGroup { members } => {
                writeln!(f, "Designers ({}):", members.len())?;
                for m in members {
                    writeln!(f, "  {}: {}", m.name, m.id)?;
                }
                Ok(())
            }
            StateSummary::MonitorDesigner {
                preset,
                orientation,
                ranges,
                allow_interlaced,
                allow_doublescan,
            } => {
                writeln!(f, "Preset: {preset}")?;
                writeln!(f, "Orientation: {orientation}")?;
                writeln!(f, "Interlaced: {allow_interlaced}")?;
                writeln!(f, "Doublescan: {allow_doublescan}")?;
                for range in ranges {
                    writeln!(f, "Range: {range}")?;
                }
                Ok(())
            }
            StateSummary::NameList { names } => {
                writeln!(f, "Names ({}):", names.len())?;
                for name in names {
                    writeln!(f, "  {name}")?;
                }
                Ok(())
            }
            StateSummary::GameOverrideManager => write!(f, "Game override manager (no fields)"),
        }
    }
}
