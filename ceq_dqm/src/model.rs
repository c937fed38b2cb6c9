//! The discrete quadratic model value object.

use std::collections::HashMap;

/// Variable index within a model.
pub type VarId = u32;

/// Case (discrete value) index of a variable.
pub type CaseId = u32;

/// Quadratic bias key, normalized so the lower variable comes first.
type QuadKey = (VarId, CaseId, VarId, CaseId);

/// Objective over named discrete variables.
///
/// Each variable takes exactly one of its cases per assignment. The objective
/// of an assignment is `offset`, plus the linear bias of every chosen case,
/// plus the quadratic bias of every chosen case pair. Unset biases are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscreteQuadraticModel {
    names: Vec<String>,
    linear: Vec<Vec<i64>>,
    quadratic: HashMap<QuadKey, i64>,
    offset: i64,
}

impl DiscreteQuadraticModel {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a discrete variable with `cases` possible values and zero biases,
    /// returning its id. Ids are dense and allocated in insertion order.
    #[contracts::debug_requires(cases > 0)]
    pub fn add_variable(&mut self, name: impl Into<String>, cases: usize) -> VarId {
        let id = self.names.len() as VarId;
        self.names.push(name.into());
        self.linear.push(vec![0; cases]);
        id
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// Number of cases of `var`.
    #[contracts::debug_requires((var as usize) < self.num_variables())]
    pub fn num_cases(&self, var: VarId) -> usize {
        self.linear[var as usize].len()
    }

    /// Case counts of all variables, in variable order.
    pub fn case_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.linear.iter().map(Vec::len)
    }

    /// Name of `var`.
    #[contracts::debug_requires((var as usize) < self.num_variables())]
    pub fn variable_name(&self, var: VarId) -> &str {
        &self.names[var as usize]
    }

    /// Variable names in id order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Constant objective offset.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Set the constant objective offset.
    pub fn set_offset(&mut self, offset: i64) {
        self.offset = offset;
    }

    /// Set the linear bias applied when `var` takes `case`.
    #[contracts::debug_requires((var as usize) < self.num_variables())]
    #[contracts::debug_requires((case as usize) < self.num_cases(var))]
    pub fn set_linear_case(&mut self, var: VarId, case: CaseId, bias: i64) {
        self.linear[var as usize][case as usize] = bias;
    }

    /// Linear bias applied when `var` takes `case`.
    #[contracts::debug_requires((var as usize) < self.num_variables())]
    #[contracts::debug_requires((case as usize) < self.num_cases(var))]
    pub fn linear_case(&self, var: VarId, case: CaseId) -> i64 {
        self.linear[var as usize][case as usize]
    }

    /// Set the quadratic bias applied when `u` takes `cu` and `v` takes `cv`.
    /// The pair is unordered; setting `(u, v)` and `(v, u)` address the same
    /// bias. A zero bias clears the entry.
    #[contracts::debug_requires(u != v)]
    #[contracts::debug_requires((u as usize) < self.num_variables())]
    #[contracts::debug_requires((v as usize) < self.num_variables())]
    #[contracts::debug_requires((cu as usize) < self.num_cases(u))]
    #[contracts::debug_requires((cv as usize) < self.num_cases(v))]
    pub fn set_quadratic_case(&mut self, u: VarId, cu: CaseId, v: VarId, cv: CaseId, bias: i64) {
        let key = quad_key(u, cu, v, cv);
        if bias == 0 {
            self.quadratic.remove(&key);
        } else {
            self.quadratic.insert(key, bias);
        }
    }

    /// Quadratic bias applied when `u` takes `cu` and `v` takes `cv`.
    #[contracts::debug_requires(u != v)]
    #[contracts::debug_requires((u as usize) < self.num_variables())]
    #[contracts::debug_requires((v as usize) < self.num_variables())]
    pub fn quadratic_case(&self, u: VarId, cu: CaseId, v: VarId, cv: CaseId) -> i64 {
        self.quadratic
            .get(&quad_key(u, cu, v, cv))
            .copied()
            .unwrap_or(0)
    }

    /// Number of stored (non-zero) quadratic biases.
    pub fn num_quadratic_biases(&self) -> usize {
        self.quadratic.len()
    }

    /// Evaluate the objective of a full assignment, one case per variable in
    /// id order.
    #[contracts::debug_requires(assignment.len() == self.num_variables())]
    #[contracts::debug_requires(
        assignment.iter().enumerate().all(|(v, &c)| (c as usize) < self.num_cases(v as VarId))
    )]
    pub fn energy(&self, assignment: &[CaseId]) -> i64 {
        let mut total = self.offset;
        for (var, &case) in assignment.iter().enumerate() {
            total += self.linear[var][case as usize];
        }
        for u in 0..assignment.len() {
            for v in (u + 1)..assignment.len() {
                total += self.quadratic_case(
                    u as VarId,
                    assignment[u],
                    v as VarId,
                    assignment[v],
                );
            }
        }
        total
    }
}

/// Normalize an unordered variable-case pair into a map key.
const fn quad_key(u: VarId, cu: CaseId, v: VarId, cv: CaseId) -> QuadKey {
    if u <= v { (u, cu, v, cv) } else { (v, cv, u, cu) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_variable_model() -> DiscreteQuadraticModel {
        let mut model = DiscreteQuadraticModel::new();
        let x = model.add_variable("x", 2);
        let y = model.add_variable("y", 3);
        model.set_offset(5);
        model.set_linear_case(x, 1, -2);
        model.set_linear_case(y, 2, 7);
        model.set_quadratic_case(x, 1, y, 0, 3);
        model
    }

    #[test]
    fn shape_accessors() {
        let model = two_variable_model();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_cases(0), 2);
        assert_eq!(model.num_cases(1), 3);
        assert_eq!(model.variable_name(0), "x");
        assert_eq!(model.case_counts().collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn energy_sums_offset_linear_and_quadratic() {
        let model = two_variable_model();
        // offset only
        assert_eq!(model.energy(&[0, 0]), 5);
        // offset + linear(x=1) + quadratic(x=1, y=0)
        assert_eq!(model.energy(&[1, 0]), 5 - 2 + 3);
        // offset + linear(x=1) + linear(y=2)
        assert_eq!(model.energy(&[1, 2]), 5 - 2 + 7);
    }

    #[test]
    fn quadratic_biases_are_unordered() {
        let model = two_variable_model();
        assert_eq!(model.quadratic_case(0, 1, 1, 0), 3);
        assert_eq!(model.quadratic_case(1, 0, 0, 1), 3);
        assert_eq!(model.quadratic_case(0, 0, 1, 0), 0);
    }

    #[test]
    fn zero_bias_clears_the_entry() {
        let mut model = two_variable_model();
        assert_eq!(model.num_quadratic_biases(), 1);
        model.set_quadratic_case(1, 0, 0, 1, 0);
        assert_eq!(model.num_quadratic_biases(), 0);
        assert_eq!(model.quadratic_case(0, 1, 1, 0), 0);
    }

    #[test]
    fn empty_model_energy_is_the_offset() {
        let mut model = DiscreteQuadraticModel::new();
        model.set_offset(-4);
        assert_eq!(model.energy(&[]), -4);
    }
}
