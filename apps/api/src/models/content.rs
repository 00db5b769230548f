use serde::{Deserialize, Serialize};

/// Sentinel category that disables portfolio filtering.
pub const ALL_CATEGORIES: &str = "all";

/// The single content document behind the public site.
///
/// Field names on the wire follow the camelCase layout of the stored record
/// (`personalInfo`, `imageUrl`, ...) so existing records load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub experiences: Vec<ExperienceEntry>,
    pub skills: Vec<SkillGroup>,
    pub performance: Vec<PerformanceMetric>,
    pub portfolio: Vec<PortfolioItem>,
    pub personal_info: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub english_name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    /// External URL or an inline `data:` URL produced by an upload.
    pub profile_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub id: String,
    pub period: String,
    pub company: String,
    pub role: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetric {
    pub id: String,
    pub label: String,
    /// Display text, e.g. "120%" or "30+".
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

/// Anything stored in one of the document's id-keyed lists.
pub trait ListEntry {
    fn id(&self) -> &str;
}

impl ListEntry for ExperienceEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListEntry for SkillGroup {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListEntry for PerformanceMetric {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListEntry for PortfolioItem {
    fn id(&self) -> &str {
        &self.id
    }
}

const SEED_IMAGE_STOREFRONT: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?auto=format&fit=crop&q=80&w=800";
const SEED_IMAGE_FOREST: &str =
    "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09?auto=format&fit=crop&q=80&w=800";
const SEED_IMAGE_DASHBOARD: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&q=80&w=800";
const SEED_IMAGE_PORTRAIT: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&q=80&w=800";

/// Placeholder image given to freshly added portfolio items.
pub const PLACEHOLDER_IMAGE_URL: &str = SEED_IMAGE_STOREFRONT;

impl ContentDocument {
    /// The static default document served when neither the remote store nor
    /// the local cache holds a record.
    pub fn seed() -> Self {
        ContentDocument {
            personal_info: Profile {
                name: "薛仲鈞".to_string(),
                english_name: "David Xue".to_string(),
                title: "品牌顧問 | 視覺設計師 | 行銷策略家".to_string(),
                bio: "積極、開朗具有耐心、責任心強。樂於在旅途中體驗不同的文化，\
                      並將所見所聞轉化為充滿溫度的設計靈思與精準的市場策略。"
                    .to_string(),
                email: "denmark1125@gmail.com".to_string(),
                location: "台灣，高雄市".to_string(),
                profile_image_url: SEED_IMAGE_PORTRAIT.to_string(),
                instagram_url: Some("https://www.instagram.com/david_xue/".to_string()),
                pdf_url: Some(String::new()),
            },
            experiences: vec![
                ExperienceEntry {
                    id: "exp1".to_string(),
                    period: "2021.07 - 現在".to_string(),
                    company: "自由接案 Freelancer".to_string(),
                    role: "品牌與設計顧問".to_string(),
                    description: vec![
                        "主導多項 CIS 視覺識別系統設計".to_string(),
                        "協助品牌進行社群行銷策略優化與網站體驗提升".to_string(),
                    ],
                },
                ExperienceEntry {
                    id: "exp2".to_string(),
                    period: "2019.12 - 2021.06".to_string(),
                    company: "扒飯米堡製飯所 PaFan Rice".to_string(),
                    role: "品牌創辦人 & 營運經理".to_string(),
                    description: vec![
                        "結合台灣食材與沖繩風格，建立完整品牌標準".to_string(),
                        "兩個月內達成 22 萬次 Google 商家瀏覽紀錄".to_string(),
                    ],
                },
                ExperienceEntry {
                    id: "exp3".to_string(),
                    period: "2015.10 - 2019.04".to_string(),
                    company: "山華企業 Lightningcreek".to_string(),
                    role: "店長 & 行銷企劃".to_string(),
                    description: vec![
                        "成功將傳統福利社轉型為獲利品牌門市".to_string(),
                        "年度業績成長達 120%，庫存去化率 90%".to_string(),
                    ],
                },
            ],
            skills: vec![
                SkillGroup {
                    id: "s1".to_string(),
                    category: "數位行銷策略".to_string(),
                    items: vec![
                        "品牌定位".to_string(),
                        "GA4 數據分析".to_string(),
                        "社群經營".to_string(),
                        "SEO 優化".to_string(),
                    ],
                },
                SkillGroup {
                    id: "s2".to_string(),
                    category: "視覺設計美學".to_string(),
                    items: vec![
                        "CIS 視覺識別".to_string(),
                        "Photoshop".to_string(),
                        "Illustrator".to_string(),
                        "商業攝影".to_string(),
                    ],
                },
                SkillGroup {
                    id: "s3".to_string(),
                    category: "創新技術應用".to_string(),
                    items: vec![
                        "No-code 開發".to_string(),
                        "AI 生成應用".to_string(),
                        "SaaS 系統規劃".to_string(),
                    ],
                },
            ],
            performance: vec![
                metric("p1", "活動營收成長", "120%"),
                metric("p2", "庫存清空率", "90%"),
                metric("p3", "網頁跳出率降低", "20%"),
                metric("p4", "社群流量提升", "30%"),
            ],
            portfolio: vec![
                PortfolioItem {
                    id: "1".to_string(),
                    title: "扒飯好食商行".to_string(),
                    category: "CIS".to_string(),
                    description: "結合日本沖繩風格與台灣傳統美食意象，打造親切溫度的視覺識別。"
                        .to_string(),
                    long_description: None,
                    image_url: SEED_IMAGE_STOREFRONT.to_string(),
                    external_link: None,
                },
                PortfolioItem {
                    id: "2".to_string(),
                    title: "新木生技視覺規劃".to_string(),
                    category: "CIS".to_string(),
                    description: "以綠色環保為核心，利用樹幹年輪設計傳達永續經營理念。".to_string(),
                    long_description: None,
                    image_url: SEED_IMAGE_FOREST.to_string(),
                    external_link: None,
                },
                PortfolioItem {
                    id: "3".to_string(),
                    title: "澤物室內設計 SaaS".to_string(),
                    category: "SaaS".to_string(),
                    description: "利用生成式 AI 邏輯，建構室內設計專用之專案管理系統。"
                        .to_string(),
                    long_description: None,
                    image_url: SEED_IMAGE_DASHBOARD.to_string(),
                    external_link: None,
                },
            ],
        }
    }

    /// Returns the filter options shown above the gallery: the "all" sentinel
    /// followed by each distinct category in first-appearance order.
    pub fn portfolio_categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in &self.portfolio {
            if !categories.iter().any(|c| c == &item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Portfolio items whose category equals `category` exactly, in document
    /// order. The "all" sentinel returns every item.
    pub fn filter_portfolio(&self, category: &str) -> Vec<&PortfolioItem> {
        if category == ALL_CATEGORIES {
            return self.portfolio.iter().collect();
        }
        self.portfolio
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }
}

fn metric(id: &str, label: &str, value: &str) -> PerformanceMetric {
    PerformanceMetric {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
    }
}
