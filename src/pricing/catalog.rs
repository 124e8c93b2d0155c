// src/pricing/catalog.rs
//
// Static reference data for the two price calculators. The public calculator
// and the admin calculator were priced separately and share option ids, so
// they live side by side as named variants instead of one merged table.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogVariant {
    Standalone,
    Admin,
}

impl CatalogVariant {
    pub const ALL: [CatalogVariant; 2] = [CatalogVariant::Standalone, CatalogVariant::Admin];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "standalone" => Some(CatalogVariant::Standalone),
            "admin" => Some(CatalogVariant::Admin),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            CatalogVariant::Standalone => "standalone",
            CatalogVariant::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Web,
    Mobile,
    Design,
    Marketing,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Web,
        Category::Mobile,
        Category::Design,
        Category::Marketing,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Mobile => "mobile",
            Category::Design => "design",
            Category::Marketing => "marketing",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Web => "Web Development",
            Category::Mobile => "Mobile Apps",
            Category::Design => "Design",
            Category::Marketing => "Digital Marketing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub base_price: u32,
    pub price_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureAddOn {
    pub id: &'static str,
    pub title: &'static str,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityLevel {
    pub id: &'static str,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeFrame {
    pub id: &'static str,
    pub multiplier: f64,
}

/// How a calculator surface asks for complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityScale {
    /// basic / standard / advanced / complex
    Discrete,
    /// 0..=100, interpolated to 0.8..=1.2
    Slider,
}

const COMPLEXITY_LEVELS: &[ComplexityLevel] = &[
    ComplexityLevel { id: "basic", multiplier: 0.8 },
    ComplexityLevel { id: "standard", multiplier: 1.0 },
    ComplexityLevel { id: "advanced", multiplier: 1.5 },
    ComplexityLevel { id: "complex", multiplier: 2.0 },
];

const TIME_FRAMES: &[TimeFrame] = &[
    TimeFrame { id: "standard", multiplier: 1.0 },
    TimeFrame { id: "accelerated", multiplier: 1.3 },
    TimeFrame { id: "rush", multiplier: 1.6 },
];

const fn option(
    id: &'static str,
    category: Category,
    title: &'static str,
    description: &'static str,
    base_price: u32,
) -> PricingOption {
    PricingOption {
        id,
        category,
        title,
        description,
        base_price,
        price_multiplier: 1.0,
    }
}

const fn addon(id: &'static str, title: &'static str, price: u32) -> FeatureAddOn {
    FeatureAddOn { id, title, price }
}

type AddOnTable = &'static [(&'static str, &'static [FeatureAddOn])];

/// Immutable catalog for one calculator surface.
#[derive(Debug)]
pub struct Catalog {
    pub variant: CatalogVariant,
    pub complexity_scale: ComplexityScale,
    options: &'static [PricingOption],
    add_ons: AddOnTable,
    complexity_levels: &'static [ComplexityLevel],
    time_frames: &'static [TimeFrame],
}

impl Catalog {
    pub fn get(variant: CatalogVariant) -> &'static Catalog {
        match variant {
            CatalogVariant::Standalone => &STANDALONE,
            CatalogVariant::Admin => &ADMIN,
        }
    }

    pub fn options(&self) -> &'static [PricingOption] {
        self.options
    }

    /// Options of one category, in catalog order.
    pub fn options_in(&self, category: Category) -> Vec<&'static PricingOption> {
        self.options
            .iter()
            .filter(|o| o.category == category)
            .collect()
    }

    pub fn option(&self, id: &str) -> Option<&'static PricingOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Add-ons registered for an option; empty when none are.
    pub fn add_ons(&self, option_id: &str) -> &'static [FeatureAddOn] {
        self.add_ons
            .iter()
            .find(|(id, _)| *id == option_id)
            .map(|(_, list)| *list)
            .unwrap_or(&[])
    }

    pub fn complexity_levels(&self) -> &'static [ComplexityLevel] {
        self.complexity_levels
    }

    pub fn time_frames(&self) -> &'static [TimeFrame] {
        self.time_frames
    }

    pub fn complexity(&self, id: &str) -> Option<&'static ComplexityLevel> {
        self.complexity_levels.iter().find(|c| c.id == id)
    }

    pub fn time_frame(&self, id: &str) -> Option<&'static TimeFrame> {
        self.time_frames.iter().find(|t| t.id == id)
    }
}

#[rustfmt::skip]
static STANDALONE: Catalog = Catalog {
    variant: CatalogVariant::Standalone,
    complexity_scale: ComplexityScale::Discrete,
    complexity_levels: COMPLEXITY_LEVELS,
    time_frames: TIME_FRAMES,
    options: &[
        option("landing-page", Category::Web, "Landing Page", "Single conversion-focused page", 1500),
        option("corporate-site", Category::Web, "Corporate Website", "Multi-page company site with CMS", 3500),
        option("web-app", Category::Web, "Web Application", "Custom application with user accounts", 5000),
        option("e-commerce", Category::Web, "Online Store", "Catalog, cart and checkout", 6000),
        option("mvp-app", Category::Mobile, "MVP App", "Core flows on one platform", 8000),
        option("cross-platform", Category::Mobile, "Cross-platform App", "One codebase for iOS and Android", 15000),
        option("native-app", Category::Mobile, "Native App", "Separate native iOS and Android builds", 22000),
        option("logo", Category::Design, "Logo", "Logo with three concepts", 500),
        option("brand-identity", Category::Design, "Brand Identity", "Logo, palette, typography and guidelines", 2500),
        option("ui-ux", Category::Design, "UI/UX Design", "Wireframes, prototype and visual design", 3000),
        option("seo", Category::Marketing, "SEO", "Technical audit and on-page optimisation", 800),
        option("smm", Category::Marketing, "Social Media", "Monthly social media management", 1000),
        option("ppc", Category::Marketing, "Paid Ads", "Campaign setup and first month of management", 1200),
    ],
    add_ons: &[
        ("landing-page", &[
            addon("copywriting", "Copywriting", 300),
            addon("analytics", "Analytics setup", 150),
            addon("ab-testing", "A/B testing", 400),
        ]),
        ("corporate-site", &[
            addon("blog", "Blog", 500),
            addon("multilingual", "Multilingual content", 800),
            addon("seo-basics", "SEO basics", 400),
        ]),
        ("web-app", &[
            addon("user-auth", "User accounts", 800),
            addon("admin-panel", "Admin panel", 1200),
            addon("payments", "Payments", 1000),
            addon("api-integration", "Third-party API integration", 900),
        ]),
        ("e-commerce", &[
            addon("payment-gateway", "Payment gateway", 700),
            addon("inventory", "Inventory sync", 900),
            addon("multilingual", "Multilingual storefront", 800),
        ]),
        ("mvp-app", &[
            addon("push-notifications", "Push notifications", 600),
            addon("offline-mode", "Offline mode", 1100),
        ]),
        ("cross-platform", &[
            addon("push-notifications", "Push notifications", 600),
            addon("in-app-purchases", "In-app purchases", 1300),
            addon("offline-mode", "Offline mode", 1100),
        ]),
        ("native-app", &[
            addon("push-notifications", "Push notifications", 800),
            addon("in-app-purchases", "In-app purchases", 1500),
            addon("wearables", "Wearable companion", 2500),
        ]),
        ("brand-identity", &[
            addon("stationery", "Stationery set", 400),
            addon("brand-book", "Brand book", 700),
        ]),
        ("ui-ux", &[
            addon("user-research", "User research", 1200),
            addon("design-system", "Design system", 1500),
        ]),
        ("seo", &[
            addon("content-plan", "Content plan", 350),
            addon("link-building", "Link building", 600),
        ]),
        ("smm", &[
            addon("content-creation", "Content creation", 700),
            addon("influencers", "Influencer outreach", 900),
        ]),
    ],
};

#[rustfmt::skip]
static ADMIN: Catalog = Catalog {
    variant: CatalogVariant::Admin,
    complexity_scale: ComplexityScale::Slider,
    complexity_levels: COMPLEXITY_LEVELS,
    time_frames: TIME_FRAMES,
    options: &[
        option("landing-page", Category::Web, "Landing Page", "Single conversion-focused page", 1200),
        option("corporate-site", Category::Web, "Corporate Website", "Multi-page company site with CMS", 3000),
        option("web-app", Category::Web, "Web Application", "Custom application with user accounts", 6500),
        option("e-commerce", Category::Web, "Online Store", "Catalog, cart and checkout", 7000),
        option("mvp-app", Category::Mobile, "MVP App", "Core flows on one platform", 9000),
        option("cross-platform", Category::Mobile, "Cross-platform App", "One codebase for iOS and Android", 14000),
        option("logo", Category::Design, "Logo", "Logo with three concepts", 450),
        option("brand-identity", Category::Design, "Brand Identity", "Logo, palette, typography and guidelines", 2800),
        option("ui-ux", Category::Design, "UI/UX Design", "Wireframes, prototype and visual design", 3500),
        option("seo", Category::Marketing, "SEO", "Technical audit and on-page optimisation", 900),
        option("smm", Category::Marketing, "Social Media", "Monthly social media management", 1100),
        option("content", Category::Marketing, "Content Marketing", "Editorial calendar and four articles", 950),
    ],
    add_ons: &[
        ("web-app", &[
            addon("user-auth", "User accounts", 1000),
            addon("admin-panel", "Admin panel", 1500),
            addon("payments", "Payments", 1200),
        ]),
        ("e-commerce", &[
            addon("payment-gateway", "Payment gateway", 800),
            addon("inventory", "Inventory sync", 1000),
        ]),
        ("cross-platform", &[
            addon("push-notifications", "Push notifications", 700),
            addon("in-app-purchases", "In-app purchases", 1400),
        ]),
        ("ui-ux", &[
            addon("user-research", "User research", 1400),
        ]),
        ("content", &[
            addon("extra-articles", "Four extra articles", 500),
        ]),
    ],
};
