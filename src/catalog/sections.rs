#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Filters,
    Drinks,
    Loader,
    NoItems,
}

pub fn derive_sections(
    has_filters: bool,
    has_visible_drinks: bool,
    exhausted: bool,
) -> Vec<Section> {
    let mut sections = Vec::with_capacity(3);
    if has_filters {
        sections.push(Section::Filters);
    }
    if has_visible_drinks {
        sections.push(Section::Drinks);
    }
    if !exhausted {
        sections.push(Section::Loader);
    } else if !has_visible_drinks {
        sections.push(Section::NoItems);
    }
    sections
}
