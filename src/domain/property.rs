use crate::domain::genre::Genre;
use serde::Serialize;

/// 頂樓樓層，適用頂樓折扣
pub const TOP_FLOOR: i32 = 10;

const LOW_FLOOR_PREMIUM: f64 = 1.05;
const TOP_FLOOR_DISCOUNT: f64 = 0.95;
const INSULATION_PREMIUM: f64 = 1.05;

/// Location-based scaling applied to `price × sqm`.
pub fn city_multiplier(city: &str) -> f64 {
    match city.to_lowercase().as_str() {
        "budapest" => 1.30,
        "debrecen" => 1.20,
        "nyíregyháza" => 1.15,
        _ => 1.00,
    }
}

/// Pricing contract shared by every property variant.
///
/// Anything written against `Valuation` must behave the same for a
/// [`StandardProperty`] and a [`PanelProperty`]; the panel only reaches the
/// base attributes through these accessors.
pub trait Valuation {
    fn city(&self) -> &str;
    fn price_per_sqm(&self) -> f64;
    fn sqm(&self) -> u32;
    fn number_of_rooms(&self) -> f64;
    fn genre(&self) -> Genre;

    /// Lowers the price per square meter by `percentage` percent.
    /// Only `1..=100` has an effect; anything else is ignored.
    fn apply_discount(&mut self, percentage: i32);

    /// Total price including every location and building modifier.
    fn total_price(&self) -> i64;

    fn summary(&self) -> String;

    /// `sqm / rooms`, or `0.0` when the room count is not positive.
    fn average_sqm_per_room(&self) -> f64 {
        let rooms = self.number_of_rooms();
        if rooms.is_nan() || rooms <= 0.0 {
            return 0.0;
        }
        f64::from(self.sqm()) / rooms
    }

    fn has_same_amount(&self, other: &dyn Valuation) -> bool {
        self.total_price() == other.total_price()
    }

    /// Per-room cost before city, floor and insulation modifiers, truncated.
    fn room_price(&self) -> i64 {
        let rooms = self.number_of_rooms();
        if rooms.is_nan() || rooms <= 0.0 {
            return 0;
        }
        (self.price_per_sqm() * f64::from(self.sqm()) / rooms) as i64
    }
}

fn describe(label: &str, property: &dyn Valuation, extra: Option<String>) -> String {
    let mut line = format!(
        "{} in {} ({}) | price/sqm: {:.2} | area: {} sqm | rooms: {:.1}",
        label,
        property.city(),
        property.genre(),
        property.price_per_sqm(),
        property.sqm(),
        property.number_of_rooms(),
    );
    if let Some(extra) = extra {
        line.push_str(" | ");
        line.push_str(&extra);
    }
    line.push_str(&format!(
        " | total price: {} | sqm/room: {:.2}",
        property.total_price(),
        property.average_sqm_per_room()
    ));
    line
}

#[derive(Debug, Clone, Serialize)]
pub struct StandardProperty {
    city: String,
    price_per_sqm: f64,
    sqm: u32,
    number_of_rooms: f64,
    genre: Genre,
}

impl StandardProperty {
    pub fn new(
        city: impl Into<String>,
        price_per_sqm: f64,
        sqm: u32,
        number_of_rooms: f64,
        genre: Genre,
    ) -> Self {
        Self {
            city: city.into(),
            price_per_sqm,
            sqm,
            number_of_rooms,
            genre,
        }
    }

    /// `price × sqm × city multiplier`, before rounding.
    pub fn compute_base_total(&self) -> f64 {
        self.price_per_sqm * f64::from(self.sqm) * city_multiplier(&self.city)
    }
}

impl Valuation for StandardProperty {
    fn city(&self) -> &str {
        &self.city
    }

    fn price_per_sqm(&self) -> f64 {
        self.price_per_sqm
    }

    fn sqm(&self) -> u32 {
        self.sqm
    }

    fn number_of_rooms(&self) -> f64 {
        self.number_of_rooms
    }

    fn genre(&self) -> Genre {
        self.genre
    }

    fn apply_discount(&mut self, percentage: i32) {
        if percentage > 0 && percentage <= 100 {
            self.price_per_sqm *= 1.0 - f64::from(percentage) / 100.0;
        }
    }

    fn total_price(&self) -> i64 {
        self.compute_base_total().round() as i64
    }

    fn summary(&self) -> String {
        describe("RealEstate", self, None)
    }
}

// 浮點欄位以位元比較，才能滿足 Eq
impl PartialEq for StandardProperty {
    fn eq(&self, other: &Self) -> bool {
        self.city == other.city
            && self.price_per_sqm.to_bits() == other.price_per_sqm.to_bits()
            && self.sqm == other.sqm
            && self.number_of_rooms.to_bits() == other.number_of_rooms.to_bits()
            && self.genre == other.genre
    }
}

impl Eq for StandardProperty {}

/// Panel-building apartment: a standard property plus floor and insulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelProperty {
    #[serde(flatten)]
    base: StandardProperty,
    floor: i32,
    is_insulated: bool,
}

impl PanelProperty {
    pub fn new(
        city: impl Into<String>,
        price_per_sqm: f64,
        sqm: u32,
        number_of_rooms: f64,
        genre: Genre,
        floor: i32,
        is_insulated: bool,
    ) -> Self {
        Self {
            base: StandardProperty::new(city, price_per_sqm, sqm, number_of_rooms, genre),
            floor,
            is_insulated,
        }
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    pub fn is_insulated(&self) -> bool {
        self.is_insulated
    }
}

impl Valuation for PanelProperty {
    fn city(&self) -> &str {
        self.base.city()
    }

    fn price_per_sqm(&self) -> f64 {
        self.base.price_per_sqm()
    }

    fn sqm(&self) -> u32 {
        self.base.sqm()
    }

    fn number_of_rooms(&self) -> f64 {
        self.base.number_of_rooms()
    }

    fn genre(&self) -> Genre {
        self.base.genre()
    }

    fn apply_discount(&mut self, percentage: i32) {
        self.base.apply_discount(percentage);
    }

    /// Starts from the rounded base total, then applies the floor and
    /// insulation modifiers and truncates.
    fn total_price(&self) -> i64 {
        let mut modified = self.base.total_price() as f64;

        if (0..=2).contains(&self.floor) {
            modified *= LOW_FLOOR_PREMIUM;
        } else if self.floor == TOP_FLOOR {
            modified *= TOP_FLOOR_DISCOUNT;
        }

        if self.is_insulated {
            modified *= INSULATION_PREMIUM;
        }

        modified as i64
    }

    fn summary(&self) -> String {
        let extra = format!(
            "floor: {} | insulated: {}",
            self.floor,
            if self.is_insulated { "yes" } else { "no" }
        );
        describe("Panel", self, Some(extra))
    }
}

/// A listing as held by the store: either variant, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    Standard(StandardProperty),
    Panel(PanelProperty),
}

impl Property {
    /// Record tag used in the input format.
    pub fn tag(&self) -> &'static str {
        match self {
            Property::Standard(_) => "REALESTATE",
            Property::Panel(_) => "PANEL",
        }
    }

    pub fn floor(&self) -> Option<i32> {
        match self {
            Property::Standard(_) => None,
            Property::Panel(panel) => Some(panel.floor()),
        }
    }

    pub fn is_insulated(&self) -> Option<bool> {
        match self {
            Property::Standard(_) => None,
            Property::Panel(panel) => Some(panel.is_insulated()),
        }
    }

    fn as_valuation(&self) -> &dyn Valuation {
        match self {
            Property::Standard(p) => p,
            Property::Panel(p) => p,
        }
    }

    fn as_valuation_mut(&mut self) -> &mut dyn Valuation {
        match self {
            Property::Standard(p) => p,
            Property::Panel(p) => p,
        }
    }
}

impl From<StandardProperty> for Property {
    fn from(value: StandardProperty) -> Self {
        Property::Standard(value)
    }
}

impl From<PanelProperty> for Property {
    fn from(value: PanelProperty) -> Self {
        Property::Panel(value)
    }
}

impl Valuation for Property {
    fn city(&self) -> &str {
        self.as_valuation().city()
    }

    fn price_per_sqm(&self) -> f64 {
        self.as_valuation().price_per_sqm()
    }

    fn sqm(&self) -> u32 {
        self.as_valuation().sqm()
    }

    fn number_of_rooms(&self) -> f64 {
        self.as_valuation().number_of_rooms()
    }

    fn genre(&self) -> Genre {
        self.as_valuation().genre()
    }

    fn apply_discount(&mut self, percentage: i32) {
        self.as_valuation_mut().apply_discount(percentage);
    }

    fn total_price(&self) -> i64 {
        self.as_valuation().total_price()
    }

    fn summary(&self) -> String {
        self.as_valuation().summary()
    }

    fn average_sqm_per_room(&self) -> f64 {
        self.as_valuation().average_sqm_per_room()
    }

    fn room_price(&self) -> i64 {
        self.as_valuation().room_price()
    }
}
