use serde::{Deserialize, Serialize};

use super::ids::IdGenerator;
use super::text::{split_description_lines, split_skill_items};
use super::EditorError;
use crate::models::content::{
    ContentDocument, ExperienceEntry, ListEntry, PerformanceMetric, PortfolioItem, SkillGroup,
    PLACEHOLDER_IMAGE_URL,
};

/// The id-keyed lists of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Experiences,
    Skills,
    Portfolio,
    Performance,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Experiences => "experiences",
            ListKind::Skills => "skills",
            ListKind::Portfolio => "portfolio",
            ListKind::Performance => "performance",
        }
    }
}

/// Where an uploaded image lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageTarget {
    Profile,
    Portfolio { id: String },
}

impl ImageTarget {
    /// Parses `profile` or `portfolio:<id>`.
    pub fn parse(raw: &str) -> Result<Self, EditorError> {
        match raw.trim() {
            "profile" => Ok(ImageTarget::Profile),
            other => match other.strip_prefix("portfolio:") {
                Some(id) if !id.is_empty() => Ok(ImageTarget::Portfolio { id: id.to_string() }),
                _ => Err(EditorError::UnknownImageTarget(raw.to_string())),
            },
        }
    }
}

enum ProfileField {
    Name,
    EnglishName,
    Title,
    Bio,
    Email,
    Location,
    ProfileImageUrl,
    InstagramUrl,
    PdfUrl,
}

impl ProfileField {
    fn parse(field: &str) -> Result<Self, EditorError> {
        Ok(match field {
            "name" => ProfileField::Name,
            "englishName" => ProfileField::EnglishName,
            "title" => ProfileField::Title,
            "bio" => ProfileField::Bio,
            "email" => ProfileField::Email,
            "location" => ProfileField::Location,
            "profileImageUrl" => ProfileField::ProfileImageUrl,
            "instagramUrl" => ProfileField::InstagramUrl,
            "pdfUrl" => ProfileField::PdfUrl,
            _ => return Err(unknown_field("personalInfo", field)),
        })
    }
}

enum ExperienceField {
    Period,
    Company,
    Role,
    Description,
}

enum SkillField {
    Category,
    Items,
}

enum MetricField {
    Label,
    Value,
}

enum PortfolioField {
    Title,
    Category,
    Description,
    LongDescription,
    ImageUrl,
    ExternalLink,
}

fn unknown_field(target: &'static str, field: &str) -> EditorError {
    EditorError::UnknownField {
        target,
        field: field.to_string(),
    }
}

/// A scratch copy of the document being edited.
///
/// All mutations land here; the live document only changes when the draft
/// is committed as a whole.
#[derive(Debug)]
pub struct Draft {
    doc: ContentDocument,
    ids: IdGenerator,
}

impl Draft {
    pub fn from_snapshot(doc: &ContentDocument) -> Self {
        Self {
            doc: doc.clone(),
            ids: IdGenerator::new(),
        }
    }

    pub fn document(&self) -> &ContentDocument {
        &self.doc
    }

    pub fn into_document(self) -> ContentDocument {
        self.doc
    }

    /// Adds a placeholder entry and returns its fresh id. Experiences and
    /// portfolio items go to the top of their list; skills and metrics to the
    /// bottom.
    pub fn append_default_entry(&mut self, list: ListKind) -> String {
        let doc = &mut self.doc;
        match list {
            ListKind::Experiences => {
                let id = self.ids.next_id(doc.experiences.iter().map(ListEntry::id));
                doc.experiences.insert(
                    0,
                    ExperienceEntry {
                        id: id.clone(),
                        period: "2024-現在".to_string(),
                        company: "新公司".to_string(),
                        role: "新職稱".to_string(),
                        description: vec!["職責一".to_string()],
                    },
                );
                id
            }
            ListKind::Skills => {
                let id = self.ids.next_id(doc.skills.iter().map(ListEntry::id));
                doc.skills.push(SkillGroup {
                    id: id.clone(),
                    category: "新領域".to_string(),
                    items: vec!["技能一".to_string(), "技能二".to_string()],
                });
                id
            }
            ListKind::Performance => {
                let id = self.ids.next_id(doc.performance.iter().map(ListEntry::id));
                doc.performance.push(PerformanceMetric {
                    id: id.clone(),
                    label: "新數據標籤".to_string(),
                    value: "100%".to_string(),
                });
                id
            }
            ListKind::Portfolio => {
                let id = self.ids.next_id(doc.portfolio.iter().map(ListEntry::id));
                doc.portfolio.insert(
                    0,
                    PortfolioItem {
                        id: id.clone(),
                        title: "新作品".to_string(),
                        category: "分類".to_string(),
                        description: "描述".to_string(),
                        long_description: None,
                        image_url: PLACEHOLDER_IMAGE_URL.to_string(),
                        external_link: None,
                    },
                );
                id
            }
        }
    }

    /// Drops the entry with `id`. Returns whether anything was removed.
    pub fn remove_entry(&mut self, list: ListKind, id: &str) -> bool {
        let doc = &mut self.doc;
        match list {
            ListKind::Experiences => remove_by_id(&mut doc.experiences, id),
            ListKind::Skills => remove_by_id(&mut doc.skills, id),
            ListKind::Performance => remove_by_id(&mut doc.performance, id),
            ListKind::Portfolio => remove_by_id(&mut doc.portfolio, id),
        }
    }

    /// Replaces one field of the entry with `id`.
    ///
    /// The field name is checked first, so an unknown field is rejected even
    /// when the id is absent. A missing id is a no-op and returns `Ok(false)`.
    pub fn update_field(
        &mut self,
        list: ListKind,
        id: &str,
        field: &str,
        value: String,
    ) -> Result<bool, EditorError> {
        let doc = &mut self.doc;
        let found = match list {
            ListKind::Experiences => {
                let field = match field {
                    "period" => ExperienceField::Period,
                    "company" => ExperienceField::Company,
                    "role" => ExperienceField::Role,
                    "description" => ExperienceField::Description,
                    _ => return Err(unknown_field("experiences", field)),
                };
                find_by_id(&mut doc.experiences, id)
                    .map(|entry| match field {
                        ExperienceField::Period => entry.period = value,
                        ExperienceField::Company => entry.company = value,
                        ExperienceField::Role => entry.role = value,
                        ExperienceField::Description => {
                            entry.description = split_description_lines(&value)
                        }
                    })
                    .is_some()
            }
            ListKind::Skills => {
                let field = match field {
                    "category" => SkillField::Category,
                    "items" => SkillField::Items,
                    _ => return Err(unknown_field("skills", field)),
                };
                find_by_id(&mut doc.skills, id)
                    .map(|group| match field {
                        SkillField::Category => group.category = value,
                        SkillField::Items => group.items = split_skill_items(&value),
                    })
                    .is_some()
            }
            ListKind::Performance => {
                let field = match field {
                    "label" => MetricField::Label,
                    "value" => MetricField::Value,
                    _ => return Err(unknown_field("performance", field)),
                };
                find_by_id(&mut doc.performance, id)
                    .map(|metric| match field {
                        MetricField::Label => metric.label = value,
                        MetricField::Value => metric.value = value,
                    })
                    .is_some()
            }
            ListKind::Portfolio => {
                let field = match field {
                    "title" => PortfolioField::Title,
                    "category" => PortfolioField::Category,
                    "description" => PortfolioField::Description,
                    "longDescription" => PortfolioField::LongDescription,
                    "imageUrl" => PortfolioField::ImageUrl,
                    "externalLink" => PortfolioField::ExternalLink,
                    _ => return Err(unknown_field("portfolio", field)),
                };
                find_by_id(&mut doc.portfolio, id)
                    .map(|item| match field {
                        PortfolioField::Title => item.title = value,
                        PortfolioField::Category => item.category = value,
                        PortfolioField::Description => item.description = value,
                        PortfolioField::LongDescription => item.long_description = Some(value),
                        PortfolioField::ImageUrl => item.image_url = value,
                        PortfolioField::ExternalLink => item.external_link = Some(value),
                    })
                    .is_some()
            }
        };
        Ok(found)
    }

    pub fn update_profile(&mut self, field: &str, value: String) -> Result<(), EditorError> {
        let profile = &mut self.doc.personal_info;
        match ProfileField::parse(field)? {
            ProfileField::Name => profile.name = value,
            ProfileField::EnglishName => profile.english_name = value,
            ProfileField::Title => profile.title = value,
            ProfileField::Bio => profile.bio = value,
            ProfileField::Email => profile.email = value,
            ProfileField::Location => profile.location = value,
            ProfileField::ProfileImageUrl => profile.profile_image_url = value,
            ProfileField::InstagramUrl => profile.instagram_url = Some(value),
            ProfileField::PdfUrl => profile.pdf_url = Some(value),
        }
        Ok(())
    }

    /// Stores an inline image, replacing whatever URL was there. Returns
    /// `false` when the portfolio id is absent.
    pub fn set_image(&mut self, target: &ImageTarget, data_url: String) -> bool {
        match target {
            ImageTarget::Profile => {
                self.doc.personal_info.profile_image_url = data_url;
                true
            }
            ImageTarget::Portfolio { id } => find_by_id(&mut self.doc.portfolio, id)
                .map(|item| item.image_url = data_url)
                .is_some(),
        }
    }
}

fn find_by_id<'a, T: ListEntry>(list: &'a mut [T], id: &str) -> Option<&'a mut T> {
    list.iter_mut().find(|entry| entry.id() == id)
}

fn remove_by_id<T: ListEntry>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id() != id);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn draft() -> Draft {
        Draft::from_snapshot(&ContentDocument::seed())
    }

    #[test]
    fn test_append_then_remove_restores_every_list() {
        for list in [
            ListKind::Experiences,
            ListKind::Skills,
            ListKind::Portfolio,
            ListKind::Performance,
        ] {
            let mut d = draft();
            let id = d.append_default_entry(list);
            assert_ne!(d.document(), &ContentDocument::seed(), "{list:?}");
            assert!(d.remove_entry(list, &id));
            assert_eq!(d.document(), &ContentDocument::seed(), "{list:?}");
        }
    }

    #[test]
    fn test_append_positions() {
        let mut d = draft();
        let exp = d.append_default_entry(ListKind::Experiences);
        let item = d.append_default_entry(ListKind::Portfolio);
        let skill = d.append_default_entry(ListKind::Skills);
        let metric = d.append_default_entry(ListKind::Performance);

        let doc = d.document();
        assert_eq!(doc.experiences[0].id, exp);
        assert_eq!(doc.portfolio[0].id, item);
        assert_eq!(doc.skills.last().unwrap().id, skill);
        assert_eq!(doc.performance.last().unwrap().id, metric);
    }

    #[test]
    fn test_rapid_appends_have_unique_ids() {
        let mut d = draft();
        for _ in 0..50 {
            d.append_default_entry(ListKind::Performance);
        }
        let ids: HashSet<&str> = d.document().performance.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), d.document().performance.len());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut d = draft();
        assert!(!d.remove_entry(ListKind::Skills, "nope"));
        assert_eq!(d.document(), &ContentDocument::seed());
    }

    #[test]
    fn test_update_skill_items_parses_comma_list() {
        let mut d = draft();
        let found = d
            .update_field(ListKind::Skills, "s1", "items", "UX, UI,  Branding ,".to_string())
            .unwrap();
        assert!(found);
        assert_eq!(d.document().skills[0].items, vec!["UX", "UI", "Branding"]);
    }

    #[test]
    fn test_update_description_splits_lines() {
        let mut d = draft();
        d.update_field(
            ListKind::Experiences,
            "exp2",
            "description",
            "first\n\nthird".to_string(),
        )
        .unwrap();
        assert_eq!(d.document().experiences[1].description, vec!["first", "", "third"]);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut d = draft();
        let found = d
            .update_field(ListKind::Performance, "p99", "value", "1".to_string())
            .unwrap();
        assert!(!found);
        assert_eq!(d.document(), &ContentDocument::seed());
    }

    #[test]
    fn test_unknown_field_rejected_before_lookup() {
        let mut d = draft();
        let err = d
            .update_field(ListKind::Portfolio, "missing", "price", "9".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::UnknownField {
                target: "portfolio",
                field: "price".to_string()
            }
        );
    }

    #[test]
    fn test_update_portfolio_optional_fields() {
        let mut d = draft();
        d.update_field(
            ListKind::Portfolio,
            "3",
            "externalLink",
            "https://example.com/case".to_string(),
        )
        .unwrap();
        assert_eq!(
            d.document().portfolio[2].external_link.as_deref(),
            Some("https://example.com/case")
        );
    }

    #[test]
    fn test_update_profile() {
        let mut d = draft();
        d.update_profile("englishName", "Dave".to_string()).unwrap();
        d.update_profile("pdfUrl", "https://example.com/cv.pdf".to_string())
            .unwrap();
        assert_eq!(d.document().personal_info.english_name, "Dave");
        assert_eq!(
            d.document().personal_info.pdf_url.as_deref(),
            Some("https://example.com/cv.pdf")
        );
        assert!(d.update_profile("age", "30".to_string()).is_err());
    }

    #[test]
    fn test_set_image_targets() {
        let mut d = draft();
        assert!(d.set_image(&ImageTarget::Profile, "data:image/png;base64,AA==".to_string()));
        assert!(d.set_image(
            &ImageTarget::Portfolio { id: "2".to_string() },
            "data:image/gif;base64,R0==".to_string()
        ));
        assert!(!d.set_image(
            &ImageTarget::Portfolio { id: "404".to_string() },
            "data:image/gif;base64,R0==".to_string()
        ));

        let doc = d.document();
        assert_eq!(doc.personal_info.profile_image_url, "data:image/png;base64,AA==");
        assert_eq!(doc.portfolio[1].image_url, "data:image/gif;base64,R0==");
    }

    #[test]
    fn test_image_target_parse() {
        assert_eq!(ImageTarget::parse("profile"), Ok(ImageTarget::Profile));
        assert_eq!(
            ImageTarget::parse("portfolio:42"),
            Ok(ImageTarget::Portfolio { id: "42".to_string() })
        );
        assert!(ImageTarget::parse("portfolio:").is_err());
        assert!(ImageTarget::parse("banner").is_err());
    }

    #[test]
    fn test_draft_does_not_alias_snapshot() {
        let live = ContentDocument::seed();
        let mut d = Draft::from_snapshot(&live);
        d.update_profile("name", "Changed".to_string()).unwrap();
        assert_eq!(live, ContentDocument::seed());
    }
}
