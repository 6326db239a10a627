//! Load planning: which archives to read, once each.

use resac_grid::{Resolution, Variable};

use crate::naming::Source;

/// One archive the plan will read, tagged with the roles it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    variable: Variable,
    resolution: Resolution,
    source: Source,
    input: bool,
    output: bool,
}

impl PlanEntry {
    /// The physical variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The resolution code.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Which archive directory the field is read from.
    pub fn source(&self) -> Source {
        self.source
    }

    /// `true` when the field feeds the model.
    pub fn is_input(&self) -> bool {
        self.input
    }

    /// `true` when the field is a prediction target.
    pub fn is_output(&self) -> bool {
        self.output
    }
}

/// The ordered set of unique archives one run must read.
///
/// Built from the input and output declarations; a (source, variable,
/// resolution) triple appearing in both roles is planned once and tagged
/// with both. Order is first appearance, inputs before outputs, so the
/// loaded collections line up with the model contract.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    entries: Vec<PlanEntry>,
}

impl LoadPlan {
    /// Plans the archives for one run.
    ///
    /// With `satellite_inputs` the input fields are read from the
    /// satellite-geometry archives while outputs stay on the model
    /// geometry; otherwise everything reads from the model geometry.
    pub fn new(
        inputs: &[(Variable, Resolution)],
        outputs: &[(Variable, Resolution)],
        satellite_inputs: bool,
    ) -> Self {
        let input_source = if satellite_inputs {
            Source::Sat
        } else {
            Source::Natl60
        };

        let mut entries: Vec<PlanEntry> = Vec::new();
        for &(variable, resolution) in inputs {
            merge(&mut entries, variable, resolution, input_source, true, false);
        }
        for &(variable, resolution) in outputs {
            merge(&mut entries, variable, resolution, Source::Natl60, false, true);
        }
        Self { entries }
    }

    /// The planned archives, in load order.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }
}

fn merge(
    entries: &mut Vec<PlanEntry>,
    variable: Variable,
    resolution: Resolution,
    source: Source,
    input: bool,
    output: bool,
) {
    if let Some(existing) = entries.iter_mut().find(|e| {
        e.variable == variable && e.resolution == resolution && e.source == source
    }) {
        existing.input |= input;
        existing.output |= output;
        return;
    }
    entries.push(PlanEntry {
        variable,
        resolution,
        source,
        input,
        output,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reso(code: u8) -> Resolution {
        Resolution::new(code)
    }

    #[test]
    fn shared_pair_planned_once_with_both_roles() {
        let plan = LoadPlan::new(
            &[(Variable::Ssh, reso(9)), (Variable::Sst, reso(9))],
            &[(Variable::Ssh, reso(9)), (Variable::Ssh, reso(3))],
            false,
        );
        let entries = plan.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].variable(), Variable::Ssh);
        assert_eq!(entries[0].resolution(), reso(9));
        assert!(entries[0].is_input() && entries[0].is_output());
        assert!(entries[1].is_input() && !entries[1].is_output());
        assert!(!entries[2].is_input() && entries[2].is_output());
    }

    #[test]
    fn satellite_inputs_split_sources() {
        let plan = LoadPlan::new(
            &[(Variable::Ssh, reso(9))],
            &[(Variable::Ssh, reso(9))],
            true,
        );
        // Same pair, different geometry: two archives.
        let entries = plan.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source(), Source::Sat);
        assert!(entries[0].is_input());
        assert_eq!(entries[1].source(), Source::Natl60);
        assert!(entries[1].is_output());
    }

    #[test]
    fn order_is_first_appearance() {
        let plan = LoadPlan::new(
            &[(Variable::Sst, reso(3)), (Variable::Ssh, reso(9))],
            &[],
            false,
        );
        let vars: Vec<_> = plan.entries().iter().map(PlanEntry::variable).collect();
        assert_eq!(vars, vec![Variable::Sst, Variable::Ssh]);
    }
}
