//! Traveller preferences that steer every pipeline stage.

use crate::{Accessibility, ValidationError};

/// How strictly the budget total must be respected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BudgetFlexibility {
    /// Cost dominates the route weighting.
    Strict,
    /// Some overspend is acceptable.
    #[default]
    Moderate,
    /// Budget is a guideline only.
    Flexible,
}

/// Total spend available for the trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Budget {
    /// Total amount in `currency` units.
    pub total: f64,
    /// ISO 4217 currency code. Informational only; no conversion happens.
    pub currency: String,
    /// How strictly the total must be respected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flexibility: BudgetFlexibility,
}

/// Trip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripDuration {
    /// Number of whole days.
    pub days: u32,
    /// Days the traveller could add or drop. Carried for the caller; the
    /// pipeline always plans exactly `days`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flexibility_days: u32,
}

/// Travel style, which sets the transport rate per kilometre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TravelStyle {
    /// First class everything.
    Luxury,
    /// Comfortable upgrades.
    Premium,
    /// Ordinary fares.
    #[default]
    Standard,
    /// Economy fares.
    Budget,
    /// Cheapest available options.
    Backpacker,
}

/// Composition of the travelling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GroupType {
    /// One traveller.
    Solo,
    /// Two travelling together.
    #[default]
    Couple,
    /// Adults with children.
    Family,
    /// Group of friends.
    Friends,
    /// Work travel.
    Business,
}

/// Size and kind of the travelling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupProfile {
    /// Number of travellers.
    pub size: u32,
    /// Group composition.
    pub kind: GroupType,
}

impl Default for GroupProfile {
    fn default() -> Self {
        Self {
            size: 2,
            kind: GroupType::Couple,
        }
    }
}

/// Accessibility requirements of the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessibilityNeeds {
    /// Someone in the group has reduced mobility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mobility: bool,
    /// Someone in the group uses a wheelchair.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wheelchair: bool,
}

impl AccessibilityNeeds {
    /// Whether an attraction with `offered` features leaves a need unmet.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::{Accessibility, AccessibilityNeeds};
    ///
    /// let needs = AccessibilityNeeds { mobility: true, wheelchair: false };
    /// assert!(needs.is_unmet_by(Accessibility::default()));
    /// assert!(!needs.is_unmet_by(Accessibility::FULL));
    /// ```
    #[must_use]
    pub const fn is_unmet_by(self, offered: Accessibility) -> bool {
        (self.mobility && !offered.mobility_friendly)
            || (self.wheelchair && !offered.wheelchair_accessible)
    }
}

/// Preferred pace of the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityLevel {
    /// Few activities, long breaks.
    Relaxed,
    /// A balanced day.
    #[default]
    Moderate,
    /// Packed days.
    Active,
}

/// Everything the traveller told us about the trip they want.
///
/// # Examples
/// ```
/// use wayfarer_core::{BudgetFlexibility, TravelStyle, TripPreferences};
///
/// let prefs = TripPreferences::new(3000.0, "EUR", 6)
///     .with_flexibility(BudgetFlexibility::Strict)
///     .with_travel_style(TravelStyle::Budget)
///     .with_interests(["art", "food"]);
///
/// assert!(prefs.validate().is_ok());
/// assert!((prefs.daily_budget() - 500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPreferences {
    /// Spend available for the whole trip.
    pub budget: Budget,
    /// Trip length.
    pub duration: TripDuration,
    /// Travel style.
    #[cfg_attr(feature = "serde", serde(default))]
    pub travel_style: TravelStyle,
    /// Interest tags matched against attraction categories.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interests: Vec<String>,
    /// Travelling group.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: GroupProfile,
    /// Accessibility requirements.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessibility: AccessibilityNeeds,
    /// Preferred pace.
    #[cfg_attr(feature = "serde", serde(default))]
    pub activity_level: ActivityLevel,
}

impl TripPreferences {
    /// Construct preferences with defaults for everything but budget and length.
    #[must_use]
    pub fn new(budget_total: f64, currency: impl Into<String>, days: u32) -> Self {
        Self {
            budget: Budget {
                total: budget_total,
                currency: currency.into(),
                flexibility: BudgetFlexibility::default(),
            },
            duration: TripDuration {
                days,
                flexibility_days: 0,
            },
            travel_style: TravelStyle::default(),
            interests: Vec::new(),
            group: GroupProfile::default(),
            accessibility: AccessibilityNeeds::default(),
            activity_level: ActivityLevel::default(),
        }
    }

    /// Set the budget flexibility.
    #[must_use]
    pub fn with_flexibility(mut self, flexibility: BudgetFlexibility) -> Self {
        self.budget.flexibility = flexibility;
        self
    }

    /// Set the travel style.
    #[must_use]
    pub fn with_travel_style(mut self, style: TravelStyle) -> Self {
        self.travel_style = style;
        self
    }

    /// Replace the interest tags.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Set the accessibility requirements.
    #[must_use]
    pub fn with_accessibility(mut self, needs: AccessibilityNeeds) -> Self {
        self.accessibility = needs;
        self
    }

    /// Set the travelling group.
    #[must_use]
    pub fn with_group(mut self, size: u32, kind: GroupType) -> Self {
        self.group = GroupProfile { size, kind };
        self
    }

    /// Set the preferred pace.
    #[must_use]
    pub fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = level;
        self
    }

    /// Check the budget and duration are usable.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveBudget`] for a budget that is not
    /// a positive finite number and [`ValidationError::ZeroDuration`] for a
    /// zero-day trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let total = self.budget.total;
        if !total.is_finite() || total <= 0.0 {
            return Err(ValidationError::NonPositiveBudget(total));
        }
        if self.duration.days == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(())
    }

    /// Budget per trip day. Only meaningful after [`Self::validate`] succeeds.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "daily budget is a floating-point share of the total"
    )]
    pub fn daily_budget(&self) -> f64 {
        self.budget.total / f64::from(self.duration.days.max(1))
    }
}
