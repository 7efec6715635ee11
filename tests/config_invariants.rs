use csv_charts::{
    ChartConfig, ChartKind, ColumnSchema, SemanticType,
    config::change_kind,
    recommend::{MAX_DEFAULT_Y_KEYS, default_config, recommend},
};
use proptest::prelude::*;

const KEYS: [&str; 5] = ["region", "units", "revenue", "cost", "notes"];

fn schema() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("region", SemanticType::Categorical),
        ColumnSchema::new("units", SemanticType::Numeric),
        ColumnSchema::new("revenue", SemanticType::Numeric),
        ColumnSchema::new("cost", SemanticType::Numeric),
        ColumnSchema::new("notes", SemanticType::Categorical),
    ]
}

#[derive(Debug, Clone)]
enum Edit {
    Title(String),
    SetX(Option<usize>),
    ToggleY(usize, bool),
    Kind(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Edit::Title),
        proptest::option::of(0..KEYS.len()).prop_map(Edit::SetX),
        (0..KEYS.len(), any::<bool>()).prop_map(|(idx, include)| Edit::ToggleY(idx, include)),
        (0..ChartKind::ALL.len()).prop_map(Edit::Kind),
    ]
}

fn apply(config: &ChartConfig, edit: &Edit) -> ChartConfig {
    match edit {
        Edit::Title(text) => config.set_title(text.clone()),
        Edit::SetX(idx) => config
            .set_x_axis(idx.map(|i| KEYS[i]))
            .expect("known x key"),
        Edit::ToggleY(idx, include) => config
            .toggle_y_axis(KEYS[*idx], *include)
            .expect("known y key"),
        Edit::Kind(idx) => change_kind(ChartKind::ALL[*idx], &schema()),
    }
}

fn assert_flags_match_axes(config: &ChartConfig) {
    for role in config.columns() {
        assert_eq!(
            role.is_x_axis(),
            config.x_axis_key() == Some(role.key()),
            "x flag for {}",
            role.key()
        );
        assert_eq!(
            role.is_y_axis(),
            config.y_axis_keys().iter().any(|key| key == role.key()),
            "y flag for {}",
            role.key()
        );
        assert_eq!(
            role.is_pie_value(),
            config.kind() == ChartKind::Pie
                && config.y_axis_keys().first().map(String::as_str) == Some(role.key()),
            "pie flag for {}",
            role.key()
        );
    }
}

proptest! {
    #[test]
    fn role_flags_always_mirror_axis_fields(edits in proptest::collection::vec(edit_strategy(), 0..24)) {
        let mut config = default_config(recommend(&schema()), &schema());
        assert_flags_match_axes(&config);
        for edit in &edits {
            config = apply(&config, edit);
            assert_flags_match_axes(&config);
            let mut seen = std::collections::HashSet::new();
            prop_assert!(config.y_axis_keys().iter().all(|key| seen.insert(key.clone())));
        }
    }

    #[test]
    fn recommend_is_total(types in proptest::collection::vec(any::<bool>(), 1..8)) {
        let columns = types
            .iter()
            .enumerate()
            .map(|(idx, numeric)| {
                let ty = if *numeric { SemanticType::Numeric } else { SemanticType::Categorical };
                ColumnSchema::new(format!("c{idx}"), ty)
            })
            .collect::<Vec<_>>();
        let kind = recommend(&columns);
        prop_assert!(ChartKind::ALL.contains(&kind));
        let config = default_config(kind, &columns);
        prop_assert!(config.y_axis_keys().len() <= MAX_DEFAULT_Y_KEYS);
        prop_assert!(config.x_axis_key().is_some());
    }
}

#[test]
fn change_kind_discards_previous_edits() {
    let config = default_config(ChartKind::Bar, &schema())
        .set_title("Edited")
        .toggle_y_axis("cost", true)
        .expect("add cost");
    let reset = change_kind(ChartKind::Line, &schema());
    assert_eq!(reset.kind(), ChartKind::Line);
    assert_eq!(reset.y_axis_keys(), ["units", "revenue"]);
    assert_ne!(reset.title(), config.title());
    assert_eq!(config.with_kind(ChartKind::Line), reset);
}

#[test]
fn removing_a_middle_series_keeps_the_rest_in_order() {
    let config = default_config(ChartKind::Area, &schema())
        .toggle_y_axis("cost", true)
        .expect("add cost")
        .toggle_y_axis("revenue", false)
        .expect("remove revenue");
    assert_eq!(config.y_axis_keys(), ["units", "cost"]);
}
