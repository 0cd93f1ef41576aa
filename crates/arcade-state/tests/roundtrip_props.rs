//! Property tests for encoding and name list parsing.

use arcade_state::codec::{
    StringEnum, decode_cp_designer_state, decode_monitor_designer_state, decode_name_list_state,
    encode_cp_designer_state, encode_monitor_designer_state, encode_name_list_state,
};
use arcade_state::model::{
    ButtonCluster, ConfigurationBuilder, Control, ControlType, ModelineConfig, Orientation,
    builtin_def, parse_names,
};
use arcade_state::{CpDesignerState, MonitorDesignerState, NameListState};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct ControlSpec {
    name: String,
    control_type: ControlType,
    num_buttons: u32,
    opposite: bool,
}

#[derive(Clone, Debug)]
struct SetSpec {
    controls: Vec<usize>,
    cluster: Option<usize>,
}

fn control_type_strategy() -> impl Strategy<Value = ControlType> {
    proptest::sample::select(ControlType::values())
}

fn control_strategy() -> impl Strategy<Value = ControlSpec> {
    ("[A-Za-z0-9 ]{0,12}", control_type_strategy(), 0u32..12, any::<bool>()).prop_map(
        |(name, control_type, num_buttons, opposite)| ControlSpec {
            name,
            control_type,
            num_buttons,
            opposite,
        },
    )
}

fn configuration_strategy() -> impl Strategy<Value = (Vec<ControlSpec>, Vec<u32>, Vec<SetSpec>)> {
    (
        prop::collection::vec(control_strategy(), 1..6),
        prop::collection::vec(0u32..10, 0..3),
    )
        .prop_flat_map(|(controls, clusters)| {
            let num_controls = controls.len();
            let num_clusters = clusters.len();
            let cluster = if num_clusters == 0 {
                Just(None).boxed()
            } else {
                proptest::option::of(0..num_clusters).boxed()
            };
            let set = (prop::collection::vec(0..num_controls, 0..4), cluster)
                .prop_map(|(controls, cluster)| SetSpec { controls, cluster });
            (Just(controls), Just(clusters), prop::collection::vec(set, 0..4))
        })
}

fn build_state(
    controls: &[ControlSpec],
    clusters: &[u32],
    sets: &[SetSpec],
) -> CpDesignerState {
    let mut builder = ConfigurationBuilder::new();
    let control_handles: Vec<_> = controls
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let def = builtin_def(c.control_type).unwrap();
            let mut control = Control::new(c.name.clone(), def, c.num_buttons, c.opposite);
            control.id = format!("control-{i}");
            builder.add_control(control).unwrap()
        })
        .collect();
    let cluster_handles: Vec<_> = clusters
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let mut cluster = ButtonCluster::new(format!("Cluster {i}"), n, i % 2 == 1);
            cluster.id = format!("cluster-{i}");
            builder.add_button_cluster(cluster).unwrap()
        })
        .collect();
    for set in sets {
        let handles = set.controls.iter().map(|&i| control_handles[i]).collect();
        let cluster = set.cluster.map(|i| cluster_handles[i]);
        builder.add_control_set(handles, cluster).unwrap();
    }
    CpDesignerState {
        cp_config: builder.build(),
    }
}

proptest! {
    #[test]
    fn test_configuration_roundtrip((controls, clusters, sets) in configuration_strategy()) {
        let state = build_state(&controls, &clusters, &sets);
        let encoded = encode_cp_designer_state(&state);
        let decoded = decode_cp_designer_state(Some(&encoded), "sCPDesignerState").unwrap();
        prop_assert_eq!(&decoded, &state);
        prop_assert_eq!(encode_cp_designer_state(&decoded), encoded);
    }

    #[test]
    fn test_modeline_roundtrip(
        preset in "[a-z0-9_]{1,16}",
        vertical in any::<bool>(),
        ranges in prop::collection::vec("[0-9.,\\- ]{0,24}", 0..4),
        allow_interlaced in any::<bool>(),
        allow_doublescan in any::<bool>(),
    ) {
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let state = MonitorDesignerState {
            modeline_config: ModelineConfig {
                preset,
                orientation,
                ranges,
                allow_interlaced,
                allow_doublescan,
            },
        };
        let encoded = encode_monitor_designer_state(&state);
        let decoded = decode_monitor_designer_state(Some(&encoded), "m").unwrap();
        prop_assert_eq!(decoded, state);
    }

    #[test]
    fn test_name_list_roundtrip(input in "\\PC{0,64}") {
        let state = NameListState::new(input);
        let decoded = decode_name_list_state(Some(&encode_name_list_state(&state)), "n").unwrap();
        prop_assert_eq!(decoded, state);
    }

    #[test]
    fn test_parsed_names_are_clean(input in "[a-z ,\\n#/*]{0,64}") {
        let names = parse_names(&input);
        for (i, name) in names.iter().enumerate() {
            prop_assert!(!name.is_empty());
            prop_assert_eq!(name.trim(), name.as_str());
            prop_assert!(!name.contains(',') && !name.contains('\n'));
            prop_assert!(!names[..i].contains(name));
        }
    }

    #[test]
    fn test_joined_names_parse_back(names in prop::collection::vec("[a-z0-9_]{1,10}", 0..8)) {
        let mut expected: Vec<String> = Vec::new();
        for name in &names {
            if !expected.contains(name) {
                expected.push(name.clone());
            }
        }
        prop_assert_eq!(parse_names(&names.join(", ")), expected);
    }
}
