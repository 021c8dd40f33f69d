use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use super::loader::DataLoadError;

// ---------------------------------------------------------------------------
// Stat – the six battle stats that feed the aggregate charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    Speed,
    SpAtk,
    SpDef,
}

/// Stats compared between groups and averaged per generation.
pub const BASE_STATS: [Stat; 4] = [Stat::Hp, Stat::Attack, Stat::Defense, Stat::Speed];

/// Every battle stat, in column order.
pub const ALL_STATS: [Stat; 6] = [
    Stat::Hp,
    Stat::Attack,
    Stat::Defense,
    Stat::Speed,
    Stat::SpAtk,
    Stat::SpDef,
];

impl Stat {
    /// Column name in the source file, also used as the axis label.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Speed => "speed",
            Stat::SpAtk => "sp_atk",
            Stat::SpDef => "sp_def",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Column – categorical columns that can be enumerated for distinct values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Type1,
    Generation,
    SpecialGroup,
}

/// Columns every input file must provide, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "dexnum",
    "name",
    "type1",
    "generation",
    "special_group",
    "hp",
    "attack",
    "defense",
    "speed",
    "sp_atk",
    "sp_def",
    "height",
    "weight",
];

// ---------------------------------------------------------------------------
// Record – one row of the catalog
// ---------------------------------------------------------------------------

/// A single creature. Field names match the source columns so CSV and JSON
/// rows deserialize straight into it; unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub dexnum: u32,
    pub name: String,
    pub type1: String,
    /// Categorical; numeric labels in the source file are read as text.
    #[serde(deserialize_with = "category_text")]
    pub generation: String,
    pub special_group: String,
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub sp_atk: f64,
    pub sp_def: f64,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
}

impl Record {
    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::SpAtk => self.sp_atk,
            Stat::SpDef => self.sp_def,
        }
    }

    /// Display form of a categorical column.
    pub fn category(&self, column: Column) -> String {
        match column {
            Column::Type1 => self.type1.clone(),
            Column::Generation => self.generation.clone(),
            Column::SpecialGroup => self.special_group.clone(),
        }
    }
}

/// Accept a categorical cell written either as text or as a number.
fn category_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(s) => s,
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) => f.to_string(),
    })
}

/// Generation order for grouped output: numeric labels ascending and ahead of
/// non-numeric ones, which sort as text.
pub fn generation_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded catalog
// ---------------------------------------------------------------------------

/// The immutable catalog with unique `dexnum`s and the distinct filter
/// values pre-computed in first-seen order.
#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
    generations: Vec<String>,
    types: Vec<String>,
}

impl Table {
    /// Index the records, rejecting duplicate identifiers.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataLoadError> {
        let mut by_dexnum: HashMap<u32, usize> = HashMap::with_capacity(records.len());
        let mut generations: Vec<String> = Vec::new();
        let mut types: Vec<String> = Vec::new();

        for (row, rec) in records.iter().enumerate() {
            if let Some(first) = by_dexnum.insert(rec.dexnum, row) {
                return Err(DataLoadError::DuplicateId {
                    dexnum: rec.dexnum,
                    first,
                    second: row,
                });
            }
            if !generations.contains(&rec.generation) {
                generations.push(rec.generation.clone());
            }
            if !types.contains(&rec.type1) {
                types.push(rec.type1.clone());
            }
        }

        Ok(Table {
            records,
            generations,
            types,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: usize) -> &Record {
        &self.records[row]
    }

    /// Look up a record by its primary key.
    #[cfg(test)]
    pub fn get(&self, dexnum: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.dexnum == dexnum)
    }

    /// Distinct generations in first-seen order.
    pub fn generations(&self) -> &[String] {
        &self.generations
    }

    /// Distinct primary types in first-seen order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Distinct values of any categorical column, in first-seen order.
    pub fn distinct_values(&self, column: Column) -> Vec<String> {
        match column {
            Column::Generation => self.generations.clone(),
            Column::Type1 => self.types.clone(),
            Column::SpecialGroup => {
                let mut seen = Vec::new();
                for rec in &self.records {
                    let value = rec.category(column);
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
                seen
            }
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
