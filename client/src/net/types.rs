//! Wire DTOs for the accounts, blog, trek and booking services.
//!
//! DESIGN
//! ======
//! The backend is lenient about shapes (bare arrays vs. paginated wrappers,
//! decimals as strings, categories as names or objects). The lenient parts
//! are absorbed here so views only ever see one shape per resource.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::blog_content::BlogContent;
use crate::state::session::Session;

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Body of `POST /api/accounts/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Token payload returned by every login flavour.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "accessToken", alias = "token")]
    pub access: Option<String>,
    #[serde(default, alias = "refreshToken")]
    pub refresh: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    /// Convert into a `Session`; `None` when no access token was issued.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let access_token = self.access.filter(|t| !t.is_empty())?;
        Some(Session {
            access_token,
            refresh_token: self.refresh.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
        })
    }
}

/// Body of `POST /accounts/register/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of `POST /accounts/verify-otp/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OtpVerification {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /api/accounts/password/reset/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Acknowledgement from account calls that do not sign the visitor in
/// (registration, code resend, reset request).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountNotice {
    pub message: Option<String>,
}

impl<'de> Deserialize<'de> for AccountNotice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let message = value.as_ref().and_then(Value::as_object).and_then(|map| {
            ["message", "detail"]
                .iter()
                .filter_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .find(|m| !m.is_empty())
                .map(str::to_owned)
        });
        Ok(Self { message })
    }
}

/// Body of `POST /api/accounts/token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

// =============================================================================
// BLOG
// =============================================================================

/// A blog post from either the list or the detail serializer.
///
/// The backend sends overlapping fields (`image` next to `featuredImage`,
/// `excerpt` next to `description`); each is decoded on its own and merged
/// in `From<BlogPostWire>`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BlogPostWire")]
pub struct BlogPost {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub content: BlogContent,
    pub category: Option<String>,
    pub category_slug: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    /// Minutes.
    pub read_time: Option<u32>,
    pub views: u64,
    pub featured_image: Option<FeaturedImage>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogPostWire {
    #[serde(default)]
    id: Option<i64>,
    slug: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: BlogContent,
    #[serde(default, deserialize_with = "deserialize_label")]
    category: Option<String>,
    #[serde(default)]
    category_slug: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    author: Option<String>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    read_time: Option<u32>,
    #[serde(default)]
    engagement: Option<Engagement>,
    #[serde(default, deserialize_with = "deserialize_image")]
    featured_image: Option<FeaturedImage>,
    #[serde(default, deserialize_with = "deserialize_image")]
    image: Option<FeaturedImage>,
    #[serde(default, deserialize_with = "deserialize_image")]
    featured_image_file: Option<FeaturedImage>,
    #[serde(default, deserialize_with = "deserialize_image")]
    image_file: Option<FeaturedImage>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Default, Deserialize)]
struct Engagement {
    #[serde(default)]
    views: u64,
}

impl From<BlogPostWire> for BlogPost {
    fn from(wire: BlogPostWire) -> Self {
        let alt = wire.title.clone();
        let featured_image = [wire.featured_image, wire.image, wire.featured_image_file, wire.image_file]
            .into_iter()
            .flatten()
            .next()
            .map(|image| FeaturedImage { alt: image.alt.or_else(|| Some(alt.clone())), ..image });
        Self {
            id: wire.id,
            slug: wire.slug,
            title: wire.title,
            subtitle: non_blank(wire.subtitle),
            excerpt: non_blank(wire.excerpt),
            description: non_blank(wire.description),
            content: wire.content,
            category: wire.category,
            category_slug: non_blank(wire.category_slug),
            author: wire.author,
            published_at: non_blank(wire.publish_date),
            read_time: wire.read_time.filter(|m| *m > 0),
            views: wire.engagement.unwrap_or_default().views,
            featured_image,
            tags: wire.tags,
        }
    }
}

impl BlogPost {
    /// Teaser text: the excerpt, else the description.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.excerpt.as_deref().or(self.description.as_deref())
    }

    /// Body blocks, falling back to the description when the post has none.
    #[must_use]
    pub fn body(&self) -> BlogContent {
        if self.content.is_empty() {
            self.description.as_deref().map(BlogContent::from_text).unwrap_or_default()
        } else {
            self.content.clone()
        }
    }
}

/// One page of blog posts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BlogPageWire")]
pub struct BlogPage {
    pub results: Vec<BlogPost>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlogPageWire {
    Bare(Vec<BlogPost>),
    Paged {
        results: Vec<BlogPost>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
}

impl From<BlogPageWire> for BlogPage {
    fn from(wire: BlogPageWire) -> Self {
        match wire {
            BlogPageWire::Bare(results) => {
                let count = results.len() as u64;
                Self { results, count, next: None, previous: None }
            }
            BlogPageWire::Paged { results, count, next, previous } => {
                let count = count.unwrap_or(results.len() as u64);
                Self { results, count, next, previous }
            }
        }
    }
}

impl BlogPage {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub name: String,
    pub slug: String,
}

// =============================================================================
// TREKS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trek {
    #[serde(default)]
    pub id: Option<i64>,
    pub slug: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub region: Option<String>,
    /// Length in days.
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub price: Option<f64>,
}

/// Trek listing in any of the shapes the trek service emits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrekList(pub Vec<Trek>);

impl<'de> Deserialize<'de> for TrekList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(Vec<Trek>),
            Results { results: Vec<Trek> },
            Data { data: Vec<Trek> },
            Treks { treks: Vec<Trek> },
        }
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(treks)
            | Wire::Results { results: treks }
            | Wire::Data { data: treks }
            | Wire::Treks { treks } => Self(treks),
        })
    }
}

/// Bounding box used to reject obviously wrong itinerary coordinates.
pub const NEPAL_BOUNDS: (LatLng, LatLng) = (LatLng::new(26.3, 80.0), LatLng::new(30.4, 88.2));

/// One day of a trek itinerary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub longitude: Option<f64>,
}

impl ItineraryDay {
    /// Overnight position, if the day carries coordinates inside Nepal.
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        let (lat, lng) = (self.latitude?, self.longitude?);
        let (min, max) = NEPAL_BOUNDS;
        ((min.lat..=max.lat).contains(&lat) && (min.lng..=max.lng).contains(&lng)).then(|| LatLng::new(lat, lng))
    }

    /// Display label, falling back to `Day N` with the 1-based `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.title
            .as_deref()
            .or(self.place_name.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| format!("Day {}", self.day.map_or_else(|| (index + 1).to_string(), |d| d.to_string())), str::to_owned)
    }
}

/// Itinerary as a bare list or a paginated wrapper.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Itinerary(pub Vec<ItineraryDay>);

impl<'de> Deserialize<'de> for Itinerary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(Vec<ItineraryDay>),
            Results { results: Vec<ItineraryDay> },
        }
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(days) | Wire::Results { results: days } => Self(days),
        })
    }
}

impl Itinerary {
    /// Waypoints of every day that has usable coordinates, in order.
    #[must_use]
    pub fn waypoints(&self) -> Vec<LatLng> {
        self.0.iter().filter_map(ItineraryDay::position).collect()
    }
}

// =============================================================================
// BOOKINGS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDetail {
    pub booking_ref: String,
    #[serde(default, alias = "trek_name")]
    pub trek_title: Option<String>,
    #[serde(default)]
    pub trek_slug: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub lead_first_name: Option<String>,
    #[serde(default)]
    pub lead_last_name: Option<String>,
    #[serde(default)]
    pub lead_email: Option<String>,
}

fn default_party_size() -> u32 {
    1
}

impl BookingDetail {
    /// Lead traveller's display name, if any part of it is known.
    #[must_use]
    pub fn lead_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.lead_first_name, &self.lead_last_name]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Total formatted with its currency, e.g. `USD 1450.00`.
    #[must_use]
    pub fn formatted_total(&self) -> Option<String> {
        let amount = self.total_amount?;
        let currency = self.currency.as_deref().unwrap_or("USD").to_ascii_uppercase();
        Some(format!("{currency} {amount:.2}"))
    }
}

// =============================================================================
// GEO
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// =============================================================================
// LENIENT FIELD DECODERS
// =============================================================================

/// Accept a plain string or an object carrying `name`/`title`.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(label_of))
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("title"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

/// Accept a number, a numeric string (`"1450.00"`), or a string with a
/// leading number (`"12 days"`).
fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_number(&s),
        _ => None,
    })
}

/// Accept an image URL string or an object carrying `url` (or `src`).
fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<FeaturedImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let image = match value {
        Some(Value::String(url)) => Some(FeaturedImage { url, ..FeaturedImage::default() }),
        Some(Value::Object(map)) => {
            let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
            text("url").or_else(|| text("src")).map(|url| FeaturedImage {
                url,
                alt: text("alt").filter(|a| !a.trim().is_empty()),
                caption: text("caption").filter(|c| !c.trim().is_empty()),
            })
        }
        _ => None,
    };
    Ok(image.filter(|i| !i.url.trim().is_empty()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}
