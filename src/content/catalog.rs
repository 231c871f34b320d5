use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FinketError, Result};

const EMBEDDED_CATALOG: &str = include_str!("../../content/catalog.json");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreen {
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCard {
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSource {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// Static panel content. Parsed once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub home: HomeScreen,
    pub links: Vec<LinkCard>,
    pub tips: Vec<String>,
    pub news: Vec<NewsSource>,
    pub story: Story,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedTip<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn load() -> Result<Catalog> {
        Catalog::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Catalog> {
        let raw = std::fs::read_to_string(path)?;
        Catalog::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Catalog> {
        let catalog: Catalog = serde_json::from_str(raw).map_err(FinketError::CatalogParse)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        require_text("home", 0, "headline", &self.home.headline)?;

        for (idx, link) in self.links.iter().enumerate() {
            require_text("links", idx, "name", &link.name)?;
            require_text("links", idx, "description", &link.description)?;
            require_url("links", idx, &link.url)?;
        }

        if self.tips.is_empty() {
            return Err(invalid("tips", 0, "at least one tip is required"));
        }
        for (idx, tip) in self.tips.iter().enumerate() {
            require_text("tips", idx, "text", tip)?;
        }

        for (idx, source) in self.news.iter().enumerate() {
            require_text("news", idx, "title", &source.title)?;
            require_text("news", idx, "description", &source.description)?;
            require_url("news", idx, &source.url)?;
        }

        require_text("story", 0, "title", &self.story.title)?;
        for (idx, paragraph) in self.story.paragraphs.iter().enumerate() {
            require_text("story", idx, "paragraph", paragraph)?;
        }

        Ok(())
    }

    /// Tips paired with their 1-based display number.
    pub fn numbered_tips(&self) -> Vec<NumberedTip<'_>> {
        self.tips
            .iter()
            .enumerate()
            .map(|(idx, text)| NumberedTip {
                number: idx + 1,
                text: text.as_str(),
            })
            .collect()
    }
}

fn require_text(section: &'static str, index: usize, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(section, index, format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_url(section: &'static str, index: usize, url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(invalid(
            section,
            index,
            format!("url must use http or https: '{url}'"),
        ));
    }
    Ok(())
}

fn invalid(section: &'static str, index: usize, reason: impl Into<String>) -> FinketError {
    FinketError::CatalogInvalid {
        section,
        index,
        reason: reason.into(),
    }
}
