mod catalog;
mod sections;

pub use catalog::{Catalog, HomeScreen, LinkCard, NewsSource, NumberedTip, Story};
pub use sections::{Background, Section, SectionEntry, menu};
