//! Header sniffing.
//!
//! Headers are matched case-insensitively by substring against a synonym
//! list per field. Synonyms are tried in order, and for each synonym the
//! leftmost matching header wins, so "Description" is preferred over
//! "Risk ID" for the name column.

use crate::grid::Cell;

/// Register fields an import column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Risk name or description (required)
    Name,
    /// Probability rating (required)
    Probability,
    /// Impact rating (required)
    Impact,
    /// Owner
    Owner,
    /// Status text
    Status,
    /// Notes
    Notes,
    /// Comments and lessons learned
    Comments,
    /// Category
    Category,
    /// Mitigation effectiveness
    Mitigation,
    /// Project
    Project,
}

impl Field {
    /// Every field, required ones first.
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Probability,
        Field::Impact,
        Field::Owner,
        Field::Status,
        Field::Notes,
        Field::Comments,
        Field::Category,
        Field::Mitigation,
        Field::Project,
    ];

    /// Header substrings recognised for this field, in priority order.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "description", "risk"],
            Field::Probability => &["probability", "likelihood"],
            Field::Impact => &["impact", "severity"],
            Field::Owner => &["owner", "responsible"],
            Field::Status => &["status"],
            Field::Notes => &["notes"],
            Field::Comments => &["comment", "lesson"],
            Field::Category => &["category", "type"],
            Field::Mitigation => &["effectiveness", "mitigation"],
            Field::Project => &["project"],
        }
    }

    /// Whether the import fails without this column.
    pub fn is_required(&self) -> bool {
        matches!(self, Field::Name | Field::Probability | Field::Impact)
    }
}

/// Column index of each recognised field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<usize>; Field::ALL.len()],
    mitigation_percent: bool,
}

impl ColumnMap {
    /// Maps a header row.
    pub fn from_headers(headers: &[Cell]) -> Self {
        let normalized: Vec<String> = headers
            .iter()
            .map(|cell| cell.text().unwrap_or_default().to_lowercase())
            .collect();

        let mut map = Self::default();
        for (slot, field) in Field::ALL.iter().enumerate() {
            map.columns[slot] = field.synonyms().iter().find_map(|synonym| {
                normalized.iter().position(|header| header.contains(synonym))
            });
        }
        map.mitigation_percent = map
            .column(Field::Mitigation)
            .is_some_and(|index| normalized[index].contains('%'));
        map
    }

    /// Column holding `field`, if any.
    pub fn column(&self, field: Field) -> Option<usize> {
        let slot = Field::ALL.iter().position(|f| *f == field)?;
        self.columns[slot]
    }

    /// Whether the mitigation header marks its values as percentages.
    pub fn mitigation_is_percent(&self) -> bool {
        self.mitigation_percent
    }

    /// One message per absent required column.
    pub fn missing_required(&self) -> Vec<String> {
        Field::ALL
            .iter()
            .filter(|field| field.is_required() && self.column(**field).is_none())
            .map(|field| format!("Missing required column: {}", field.synonyms().join("/")))
            .collect()
    }

    /// The cell of `field` in `row`; [`Cell::Empty`] when absent.
    pub fn cell<'a>(&self, row: &'a [Cell], field: Field) -> &'a Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.column(field)
            .and_then(|index| row.get(index))
            .unwrap_or(EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|n| Cell::Text(n.to_string())).collect()
    }

    #[test]
    fn test_template_headers() {
        let map = ColumnMap::from_headers(&headers(&[
            "Name/Description",
            "Probability",
            "Impact",
            "Owner",
            "Status",
            "Category",
            "Notes",
            "Comments/Lessons",
        ]));
        assert_eq!(map.column(Field::Name), Some(0));
        assert_eq!(map.column(Field::Probability), Some(1));
        assert_eq!(map.column(Field::Comments), Some(7));
        assert_eq!(map.column(Field::Mitigation), None);
        assert!(map.missing_required().is_empty());
    }

    #[test]
    fn test_description_preferred_over_risk_id() {
        let map = ColumnMap::from_headers(&headers(&[
            "Risk ID",
            "Description",
            "Probability (1-5)",
            "Impact (1-5)",
            "Mitigation Effectiveness (%)",
            "Residual Score",
        ]));
        assert_eq!(map.column(Field::Name), Some(1));
        assert_eq!(map.column(Field::Mitigation), Some(4));
        assert!(map.mitigation_is_percent());
    }

    #[test]
    fn test_synonyms_and_case() {
        let map = ColumnMap::from_headers(&headers(&["RISK", "LIKELIHOOD", "Severity", "Responsible"]));
        assert_eq!(map.column(Field::Name), Some(0));
        assert_eq!(map.column(Field::Probability), Some(1));
        assert_eq!(map.column(Field::Impact), Some(2));
        assert_eq!(map.column(Field::Owner), Some(3));
    }

    #[test]
    fn test_missing_required() {
        let map = ColumnMap::from_headers(&headers(&["Title", "Owner"]));
        assert_eq!(
            map.missing_required(),
            vec![
                "Missing required column: name/description/risk",
                "Missing required column: probability/likelihood",
                "Missing required column: impact/severity",
            ]
        );
    }

    #[test]
    fn test_cell_lookup_past_row_end() {
        let map = ColumnMap::from_headers(&headers(&["Name", "Probability", "Impact", "Notes"]));
        let row = vec![Cell::Text("x".into())];
        assert_eq!(map.cell(&row, Field::Notes), &Cell::Empty);
    }
}
