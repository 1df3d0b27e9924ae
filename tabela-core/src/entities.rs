use serde::{Deserialize, Serialize};

/// Commercial averages for a SKU, taken from the latest `productscmp` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostProfile {
    /// Average ICMS rate (`cmp_icms`)
    pub icms_avg: f64,

    /// Average PIS/COFINS rate (`cmp_pis_cofins`)
    pub pis_cofins_avg: f64,

    /// Net average cost (`cmp`)
    pub net_avg_cost: f64,

    /// Invoiced average cost (`cmp_nf`)
    pub invoiced_avg_cost: f64,
}

/// Global tuning row (`config_params`, id = 1).
///
/// Refetched for every calculation so operators can change it between requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunableParameters {
    pub additional_profit_margin: f64,
    pub standard_profit_margin: f64,
    pub federal_tax_rate: f64,
    pub operation_rate: f64,
    pub fixed_cost: f64,
    pub pis_rate: f64,
    pub cofins_rate: f64,
    pub rebate_rate: f64,
    pub fcp_rate: f64,
    pub reduction_factor: f64,
}

/// Commission and freight for a SKU as stored by the sales channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionCost {
    pub sku: String,
    pub product_code: i64,
    pub department: Option<String>,
    /// Percent, e.g. `5.0` means 5 %
    pub commission_rate: f64,
    pub freight: f64,
}

/// Effective ICMS and Difal derived for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxClassification {
    pub effective_icms: f64,
    pub difal: f64,
}
