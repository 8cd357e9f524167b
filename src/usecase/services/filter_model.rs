use crate::domain::entities::filter::{
    Category, CriterionId, Direction, FilterCriterion, QueryPayload, ScalarFilters, TriState,
};

/// Active include/exclude criteria plus the scalar filters, compiled on demand
/// into a [`QueryPayload`].
#[derive(Debug, Clone, Default)]
pub struct FilterModel {
    criteria: Vec<FilterCriterion>,
    scalars: ScalarFilters,
    next_id: u64,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a criterion. Duplicates are kept.
    pub fn add_criterion(
        &mut self,
        direction: Direction,
        category: Category,
        selected_id: i32,
    ) -> CriterionId {
        let id = CriterionId(self.next_id);
        self.next_id += 1;
        self.criteria.push(FilterCriterion {
            id,
            direction,
            category,
            selected_id,
        });
        id
    }

    /// Returns whether anything was removed; removing twice is a no-op.
    pub fn remove_criterion(&mut self, id: CriterionId) -> bool {
        let before = self.criteria.len();
        self.criteria.retain(|criterion| criterion.id != id);
        self.criteria.len() != before
    }

    pub fn set_selection(&mut self, id: CriterionId, selected_id: i32) -> bool {
        match self.criteria.iter_mut().find(|criterion| criterion.id == id) {
            Some(criterion) => {
                criterion.selected_id = selected_id;
                true
            }
            None => false,
        }
    }

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    pub fn criteria_for(&self, direction: Direction) -> impl Iterator<Item = &FilterCriterion> {
        self.criteria
            .iter()
            .filter(move |criterion| criterion.direction == direction)
    }

    pub fn scalars(&self) -> &ScalarFilters {
        &self.scalars
    }

    /// Stores the range with the smaller year first.
    pub fn set_birth_year_range(&mut self, min: i32, max: i32) {
        self.scalars.birth_year_range = if min <= max { (min, max) } else { (max, min) };
    }

    pub fn set_can_play_for_country(&mut self, value: TriState) {
        self.scalars.can_play_for_country = value;
    }

    pub fn set_has_second_nationality(&mut self, value: TriState) {
        self.scalars.has_second_nationality = value;
    }

    pub fn set_has_declared_for_nation(&mut self, value: TriState) {
        self.scalars.has_declared_for_nation = value;
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
        self.scalars = ScalarFilters::default();
    }

    /// Groups criteria by direction and category, preserving insertion order
    /// within each group. Every group is present, empty when unconstrained.
    pub fn compile(&self) -> QueryPayload {
        let mut payload = QueryPayload {
            birth_years: self.scalars.birth_year_range,
            can_play_for_country: self.scalars.can_play_for_country.as_option(),
            has_second_nationality: self.scalars.has_second_nationality.as_option(),
            has_declared_for_nation: self.scalars.has_declared_for_nation.as_option(),
            ..QueryPayload::default()
        };

        for criterion in &self.criteria {
            payload
                .ids_mut(criterion.direction, criterion.category)
                .push(criterion.selected_id);
        }

        payload
    }
}
