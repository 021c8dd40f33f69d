//! Record builders shared by the data-layer tests.

use super::model::{Record, Table};

/// A record whose stats are all derived from `hp` so tests can vary one number.
pub fn record(
    dexnum: u32,
    name: &str,
    type1: &str,
    generation: u32,
    special_group: &str,
    hp: f64,
) -> Record {
    Record {
        dexnum,
        name: name.to_string(),
        type1: type1.to_string(),
        generation: generation.to_string(),
        special_group: special_group.to_string(),
        hp,
        attack: hp * 2.0,
        defense: hp + 5.0,
        speed: 100.0 - hp,
        sp_atk: hp * 3.0,
        sp_def: hp / 2.0,
        height: hp / 10.0,
        weight: hp * 4.0,
    }
}

/// The three-record catalog used throughout the scenario tests.
pub fn scenario_table() -> Table {
    Table::from_records(vec![
        record(1, "A", "Fire", 1, "Ordinary", 10.0),
        record(2, "B", "Fire", 1, "Legendary", 20.0),
        record(3, "C", "Water", 2, "Ordinary", 30.0),
    ])
    .expect("scenario table has unique ids")
}
