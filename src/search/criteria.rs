use serde::Serialize;

use crate::region::Region;

/// Category labels offered as one-click filters.
pub const CATEGORIES: &[&str] = &[
    "Pedreiro",
    "Eletricista",
    "Encanador",
    "Pintor",
    "Marceneiro",
    "Mecânico",
    "Cabeleireiro",
    "Manicure",
    "Dentista",
    "Advogado",
    "Contador",
    "Arquiteto",
    "Engenheiro",
    "Médico",
    "Veterinário",
];

/// What the user is searching for and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub search_term: String,
    pub tag: String,
    pub region: Region,
}

impl SearchCriteria {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            ..Self::default()
        }
    }

    /// A region alone never makes a search; a term or a tag is required.
    pub fn is_searchable(&self) -> bool {
        !self.search_term.is_empty() || !self.tag.is_empty()
    }
}
