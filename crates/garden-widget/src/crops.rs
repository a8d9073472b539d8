//! Bucketing of recommended crops into seasonal planting groups.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantingGroup {
    pub name: &'static str,
    pub crops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonColumn {
    pub title: &'static str,
    pub groups: Vec<PlantingGroup>,
}

impl SeasonColumn {
    /// Groups that received at least one crop
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &PlantingGroup> {
        self.groups.iter().filter(|g| !g.crops.is_empty())
    }
}

/// (season index, group index, name fragments). First match wins.
const RULES: [(usize, usize, &[&str]); 5] = [
    (0, 0, &["Tomato", "Pepper", "Eggplant"]),
    (0, 1, &["Pea", "Spinach", "Lettuce"]),
    (1, 0, &["Melon", "Squash"]),
    (1, 1, &["Bean", "Corn"]),
    (2, 0, &["Broccoli", "Cabbage"]),
];

/// Where crops matching no rule go: late season, direct seed
const CATCH_ALL: (usize, usize) = (2, 1);

fn column(title: &'static str, first: &'static str, second: &'static str) -> SeasonColumn {
    SeasonColumn {
        title,
        groups: vec![
            PlantingGroup {
                name: first,
                crops: Vec::new(),
            },
            PlantingGroup {
                name: second,
                crops: Vec::new(),
            },
        ],
    }
}

fn empty_columns() -> Vec<SeasonColumn> {
    vec![
        column("Early Season", "Start Indoors (Early Spring)", "Direct Seed (Spring)"),
        column("Mid Season", "Start Indoors (Late Spring)", "Direct Seed (Summer)"),
        column("Late Season", "Start Indoors (Summer)", "Direct Seed (Fall)"),
    ]
}

fn slot_for(crop: &str) -> (usize, usize) {
    RULES
        .iter()
        .find(|(_, _, fragments)| fragments.iter().any(|f| crop.contains(f)))
        .map(|(season, group, _)| (*season, *group))
        .unwrap_or(CATCH_ALL)
}

/// Group crops into early/mid/late season columns, preserving input order.
pub fn group_crops(crops: &[String]) -> Vec<SeasonColumn> {
    let mut columns = empty_columns();
    for crop in crops {
        let (season, group) = slot_for(crop);
        columns[season].groups[group].crops.push(crop.clone());
    }
    columns
}
