use std::fmt;

use super::model::{Column, Record, Table};

// ---------------------------------------------------------------------------
// Filter predicate: one optional equality per filterable column
// ---------------------------------------------------------------------------

/// A single filter control's value: the "All" sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    /// Whether a record's value passes this choice.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

/// The pair of filter controls. The two dimensions are independent; a
/// combination that matches nothing is valid and yields an empty view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub generation: Choice<String>,
    pub type1: Choice<String>,
}

impl Selection {
    pub fn matches(&self, record: &Record) -> bool {
        self.generation.admits(&record.generation) && self.type1.admits(&record.type1)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation={}, type={}", self.generation, self.type1)
    }
}

/// Values offered by the two selection controls, sentinel first.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub generations: Vec<Choice<String>>,
    pub types: Vec<Choice<String>>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Self {
        let options = |column: Column| -> Vec<Choice<String>> {
            std::iter::once(Choice::All)
                .chain(table.distinct_values(column).into_iter().map(Choice::Only))
                .collect()
        };
        FilterOptions {
            generations: options(Column::Generation),
            types: options(Column::Type1),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a [`Table`] passing a [`Selection`], in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a Table,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// The table the view was cut from; derivations use its category order.
    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Row indices into the parent table.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| table.record(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the view of records passing both equality filters.
///
/// A record passes when:
/// * the generation choice is `All` or equals the record's generation, and
/// * the type choice is `All` or equals the record's primary type.
pub fn apply_filters<'a>(table: &'a Table, selection: &Selection) -> FilteredView<'a> {
    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { table, indices }
}
