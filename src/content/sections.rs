use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Cover,
    General,
}

impl Background {
    pub fn asset_name(self) -> &'static str {
        match self {
            Background::Cover => "finket_portada.png",
            Background::General => "finket_background.png",
        }
    }
}

/// Sidebar entries, in display order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Section {
    Home,
    Simulator,
    Tips,
    Links,
    News,
    Story,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Simulator,
        Section::Tips,
        Section::Links,
        Section::News,
        Section::Story,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Simulator => "simulator",
            Section::Tips => "tips",
            Section::Links => "links",
            Section::News => "news",
            Section::Story => "story",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "🏠 Inicio",
            Section::Simulator => "💰 Simulador",
            Section::Tips => "📚 Aprende sobre El Ahorro",
            Section::Links => "🌐 Enlaces útiles",
            Section::News => "📰 Noticias en tiempo real",
            Section::Story => "📖 Nuestra historia",
        }
    }

    pub fn background(self) -> Background {
        match self {
            Section::Home => Background::Cover,
            _ => Background::General,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEntry {
    pub slug: &'static str,
    pub label: &'static str,
    pub background: Background,
    pub background_asset: &'static str,
}

impl From<Section> for SectionEntry {
    fn from(value: Section) -> Self {
        SectionEntry {
            slug: value.slug(),
            label: value.label(),
            background: value.background(),
            background_asset: value.background().asset_name(),
        }
    }
}

pub fn menu() -> Vec<SectionEntry> {
    Section::ALL.into_iter().map(SectionEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_six_sections_in_sidebar_order() {
        let slugs: Vec<_> = menu().iter().map(|e| e.slug).collect();
        assert_eq!(
            slugs,
            ["home", "simulator", "tips", "links", "news", "story"]
        );
    }

    #[test]
    fn only_home_uses_cover_background() {
        for section in Section::ALL {
            let expected = if section == Section::Home {
                Background::Cover
            } else {
                Background::General
            };
            assert_eq!(section.background(), expected, "{section:?}");
        }
    }

    #[test]
    fn slugs_round_trip_and_unknown_slug_is_none() {
        for section in Section::ALL {
            assert_eq!(Section::from_slug(section.slug()), Some(section));
        }
        assert_eq!(Section::from_slug("markets"), None);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let json = serde_json::to_string(&SectionEntry::from(Section::Home)).expect("serialize");
        assert!(json.contains("\"backgroundAsset\":\"finket_portada.png\""));
        assert!(json.contains("\"background\":\"cover\""));
    }
}
