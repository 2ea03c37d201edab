//! Site and cost-center breakdowns.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, CostCenterBreakdown, Employee, OrganizationMetrics, SiteBreakdown,
};

use super::grouping::{GroupedAccumulator, group_label};

/// The result of the organization stage.
#[derive(Debug, Clone)]
pub struct OrganizationResult {
    /// Site and cost-center breakdowns.
    pub metrics: OrganizationMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

#[derive(Debug, Default)]
struct CostCenterAccumulator {
    headcount: usize,
    payroll: Decimal,
}

/// Groups the active population by site and by cost center.
///
/// Sites are sorted by headcount and cost centers by base payroll, largest
/// first; ties keep the roster order. Employees without a code are grouped
/// under `undefined_label`.
pub fn calculate_organization(
    active: &[&Employee],
    undefined_label: &str,
    step_number: u32,
) -> OrganizationResult {
    let mut sites: GroupedAccumulator<usize> = GroupedAccumulator::new();
    let mut centers: GroupedAccumulator<CostCenterAccumulator> = GroupedAccumulator::new();

    for employee in active {
        *sites.entry(group_label(employee.site.as_deref(), undefined_label)) += 1;

        let center = centers.entry(group_label(employee.cost_center.as_deref(), undefined_label));
        center.headcount += 1;
        center.payroll += employee.base_monthly_salary;
    }

    let mut by_site: Vec<SiteBreakdown> = sites
        .into_entries()
        .into_iter()
        .map(|(site, headcount)| SiteBreakdown { site, headcount })
        .collect();
    by_site.sort_by(|a, b| b.headcount.cmp(&a.headcount));

    let mut by_cost_center: Vec<CostCenterBreakdown> = centers
        .into_entries()
        .into_iter()
        .map(|(cost_center, acc)| CostCenterBreakdown {
            cost_center,
            headcount: acc.headcount,
            payroll: acc.payroll,
        })
        .collect();
    by_cost_center.sort_by(|a, b| b.payroll.cmp(&a.payroll));

    let audit_step = AuditStep {
        step_number,
        rule_id: "organization".to_string(),
        rule_name: "Organization Breakdown".to_string(),
        input: serde_json::json!({
            "active_headcount": active.len(),
            "undefined_label": undefined_label
        }),
        output: serde_json::json!({
            "sites": by_site.len(),
            "cost_centers": by_cost_center.len(),
            "largest_site": by_site.first().map(|s| s.site.clone()),
            "largest_cost_center": by_cost_center.first().map(|c| c.cost_center.clone())
        }),
        reasoning: format!(
            "{} active employees across {} site(s) and {} cost center(s)",
            active.len(),
            by_site.len(),
            by_cost_center.len()
        ),
    };

    OrganizationResult {
        metrics: OrganizationMetrics {
            by_site,
            by_cost_center,
        },
        audit_step,
    }
}
