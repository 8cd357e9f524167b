use serde::Serialize;

pub const BIRTH_YEAR_MIN: i32 = 0;
pub const BIRTH_YEAR_MAX: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Include,
    Exclude,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Include, Direction::Exclude];

    pub fn label(self) -> &'static str {
        match self {
            Direction::Include => "Include",
            Direction::Exclude => "Exclude",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Nationality,
    ClubContracted,
    ClubPlaying,
    CompetitionContracted,
    CompetitionPlaying,
    NationContracted,
    NationPlaying,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Nationality,
        Category::ClubContracted,
        Category::ClubPlaying,
        Category::CompetitionContracted,
        Category::CompetitionPlaying,
        Category::NationContracted,
        Category::NationPlaying,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Nationality => "Nationality",
            Category::ClubContracted => "Club Contracted",
            Category::ClubPlaying => "Club Playing",
            Category::CompetitionContracted => "Competition Contracted",
            Category::CompetitionPlaying => "Competition Playing",
            Category::NationContracted => "Nation Contracted",
            Category::NationPlaying => "Nation Playing",
        }
    }

    /// Stable key used by the "Add..." menu of the filter panel.
    pub fn key(self) -> &'static str {
        match self {
            Category::Nationality => "nationality",
            Category::ClubContracted => "club_contracted",
            Category::ClubPlaying => "club_playing",
            Category::CompetitionContracted => "competition_contracted",
            Category::CompetitionPlaying => "competition_playing",
            Category::NationContracted => "nation_contracted",
            Category::NationPlaying => "nation_playing",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|category| category.key() == key)
    }
}

/// Optional boolean filter. `Unset` means "no constraint" and is never
/// coerced to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    True,
    False,
    #[default]
    Unset,
}

impl TriState {
    pub fn as_option(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unset => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TriState::True => "yes",
            TriState::False => "no",
            TriState::Unset => "any",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "yes" => TriState::True,
            "no" => TriState::False,
            _ => TriState::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CriterionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriterion {
    pub id: CriterionId,
    pub direction: Direction,
    pub category: Category,
    pub selected_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarFilters {
    pub birth_year_range: (i32, i32),
    pub can_play_for_country: TriState,
    pub has_second_nationality: TriState,
    pub has_declared_for_nation: TriState,
}

impl Default for ScalarFilters {
    fn default() -> Self {
        Self {
            birth_year_range: (BIRTH_YEAR_MIN, BIRTH_YEAR_MAX),
            can_play_for_country: TriState::Unset,
            has_second_nationality: TriState::Unset,
            has_declared_for_nation: TriState::Unset,
        }
    }
}

/// One selectable value of a category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: i32,
    pub label: String,
}

impl LookupOption {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Flat payload handed to the backend's player query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub birth_years: (i32, i32),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_play_for_country: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_second_nationality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_declared_for_nation: Option<bool>,
    pub include_nationalities: Vec<i32>,
    pub exclude_nationalities: Vec<i32>,
    pub include_clubs_contracted: Vec<i32>,
    pub exclude_clubs_contracted: Vec<i32>,
    pub include_clubs_playing: Vec<i32>,
    pub exclude_clubs_playing: Vec<i32>,
    pub include_competitions_contracted: Vec<i32>,
    pub exclude_competitions_contracted: Vec<i32>,
    pub include_competitions_playing: Vec<i32>,
    pub exclude_competitions_playing: Vec<i32>,
    pub include_nations_contracted: Vec<i32>,
    pub exclude_nations_contracted: Vec<i32>,
    pub include_nations_playing: Vec<i32>,
    pub exclude_nations_playing: Vec<i32>,
}

impl Default for QueryPayload {
    fn default() -> Self {
        Self {
            birth_years: (BIRTH_YEAR_MIN, BIRTH_YEAR_MAX),
            can_play_for_country: None,
            has_second_nationality: None,
            has_declared_for_nation: None,
            include_nationalities: Vec::new(),
            exclude_nationalities: Vec::new(),
            include_clubs_contracted: Vec::new(),
            exclude_clubs_contracted: Vec::new(),
            include_clubs_playing: Vec::new(),
            exclude_clubs_playing: Vec::new(),
            include_competitions_contracted: Vec::new(),
            exclude_competitions_contracted: Vec::new(),
            include_competitions_playing: Vec::new(),
            exclude_competitions_playing: Vec::new(),
            include_nations_contracted: Vec::new(),
            exclude_nations_contracted: Vec::new(),
            include_nations_playing: Vec::new(),
            exclude_nations_playing: Vec::new(),
        }
    }
}

impl QueryPayload {
    pub fn ids(&self, direction: Direction, category: Category) -> &[i32] {
        match (direction, category) {
            (Direction::Include, Category::Nationality) => &self.include_nationalities,
            (Direction::Exclude, Category::Nationality) => &self.exclude_nationalities,
            (Direction::Include, Category::ClubContracted) => &self.include_clubs_contracted,
            (Direction::Exclude, Category::ClubContracted) => &self.exclude_clubs_contracted,
            (Direction::Include, Category::ClubPlaying) => &self.include_clubs_playing,
            (Direction::Exclude, Category::ClubPlaying) => &self.exclude_clubs_playing,
            (Direction::Include, Category::CompetitionContracted) => {
                &self.include_competitions_contracted
            }
            (Direction::Exclude, Category::CompetitionContracted) => {
                &self.exclude_competitions_contracted
            }
            (Direction::Include, Category::CompetitionPlaying) => {
                &self.include_competitions_playing
            }
            (Direction::Exclude, Category::CompetitionPlaying) => {
                &self.exclude_competitions_playing
            }
            (Direction::Include, Category::NationContracted) => &self.include_nations_contracted,
            (Direction::Exclude, Category::NationContracted) => &self.exclude_nations_contracted,
            (Direction::Include, Category::NationPlaying) => &self.include_nations_playing,
            (Direction::Exclude, Category::NationPlaying) => &self.exclude_nations_playing,
        }
    }

    pub fn ids_mut(&mut self, direction: Direction, category: Category) -> &mut Vec<i32> {
        match (direction, category) {
            (Direction::Include, Category::Nationality) => &mut self.include_nationalities,
            (Direction::Exclude, Category::Nationality) => &mut self.exclude_nationalities,
            (Direction::Include, Category::ClubContracted) => &mut self.include_clubs_contracted,
            (Direction::Exclude, Category::ClubContracted) => &mut self.exclude_clubs_contracted,
            (Direction::Include, Category::ClubPlaying) => &mut self.include_clubs_playing,
            (Direction::Exclude, Category::ClubPlaying) => &mut self.exclude_clubs_playing,
            (Direction::Include, Category::CompetitionContracted) => {
                &mut self.include_competitions_contracted
            }
            (Direction::Exclude, Category::CompetitionContracted) => {
                &mut self.exclude_competitions_contracted
            }
            (Direction::Include, Category::CompetitionPlaying) => {
                &mut self.include_competitions_playing
            }
            (Direction::Exclude, Category::CompetitionPlaying) => {
                &mut self.exclude_competitions_playing
            }
            (Direction::Include, Category::NationContracted) => {
                &mut self.include_nations_contracted
            }
            (Direction::Exclude, Category::NationContracted) => {
                &mut self.exclude_nations_contracted
            }
            (Direction::Include, Category::NationPlaying) => &mut self.include_nations_playing,
            (Direction::Exclude, Category::NationPlaying) => &mut self.exclude_nations_playing,
        }
    }

    pub fn birth_years_constrained(&self) -> bool {
        self.birth_years != (BIRTH_YEAR_MIN, BIRTH_YEAR_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip_through_menu_values() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key(""), None);
        assert_eq!(Category::from_key("__none__"), None);
    }

    #[test]
    fn unset_tri_state_is_not_false() {
        assert_eq!(TriState::Unset.as_option(), None);
        assert_eq!(TriState::False.as_option(), Some(false));
        assert_eq!(TriState::from_key("something"), TriState::Unset);
    }

    #[test]
    fn payload_serializes_camel_case_and_omits_unset_flags() {
        let payload = QueryPayload {
            include_nationalities: vec![7, 9],
            has_second_nationality: Some(false),
            ..QueryPayload::default()
        };

        let json = serde_json::to_value(&payload).expect("payload should serialize");

        assert_eq!(json["birthYears"], serde_json::json!([0, 9999]));
        assert_eq!(json["includeNationalities"], serde_json::json!([7, 9]));
        assert_eq!(json["excludeNationsPlaying"], serde_json::json!([]));
        assert_eq!(json["hasSecondNationality"], serde_json::json!(false));
        assert!(json.get("canPlayForCountry").is_none());
        assert!(json.get("hasDeclaredForNation").is_none());
        assert_eq!(json.as_object().map(|map| map.len()), Some(16));
    }
}
