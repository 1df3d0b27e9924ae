use serde::{Deserialize, Serialize};

use crate::entities::{CommissionCost, CostProfile, TaxClassification, TunableParameters};
use crate::formula::PriceQuote;

/// Audit record of a price calculation, returned as `detalhes`.
///
/// Field names on the wire follow the legacy `detalhes` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub sku: String,
    #[serde(rename = "icms_efetivo")]
    pub effective_icms: f64,
    pub difal: f64,
    #[serde(rename = "icms_medio_calc")]
    pub icms_blend: f64,
    #[serde(rename = "pis_cofins_calc")]
    pub pis_cofins_blend: f64,
    #[serde(rename = "custo_medio_liq")]
    pub net_avg_cost: f64,
    #[serde(rename = "custo_medio_calc")]
    pub avg_cost: f64,
    #[serde(rename = "operacao")]
    pub operation_rate: f64,
    /// Raw commission percent as stored by the channel
    #[serde(rename = "comissao")]
    pub commission: f64,
    #[serde(rename = "lucro_padrao")]
    pub standard_profit_margin: f64,
    #[serde(rename = "fcp")]
    pub fcp_rate: f64,
    #[serde(rename = "frete")]
    pub freight: f64,
    #[serde(rename = "rebate")]
    pub rebate_rate: f64,
    #[serde(rename = "custo_medio_nf")]
    pub invoiced_avg_cost: f64,
    pub res1: f64,
    pub i9: f64,
    pub res3: f64,
    #[serde(rename = "imposto")]
    pub tax_burden: f64,
    #[serde(rename = "Preço Tabela U02")]
    pub final_price: f64,
    #[serde(rename = "Lucro Simulado")]
    pub simulated_profit: f64,
}

impl CalculationResult {
    /// Project the inputs and the computed quote into a report. Nothing is recomputed here.
    pub fn assemble(
        sku: &str,
        cost: &CostProfile,
        params: &TunableParameters,
        commission: &CommissionCost,
        tax: &TaxClassification,
        quote: &PriceQuote,
    ) -> Self {
        Self {
            sku: sku.to_string(),
            effective_icms: tax.effective_icms,
            difal: tax.difal,
            icms_blend: quote.icms_blend,
            pis_cofins_blend: quote.pis_cofins_blend,
            net_avg_cost: cost.net_avg_cost,
            avg_cost: quote.avg_cost,
            operation_rate: params.operation_rate,
            commission: commission.commission_rate,
            standard_profit_margin: params.standard_profit_margin,
            fcp_rate: params.fcp_rate,
            freight: commission.freight,
            rebate_rate: params.rebate_rate,
            invoiced_avg_cost: cost.invoiced_avg_cost,
            res1: quote.res1,
            i9: quote.i9,
            res3: quote.res3,
            tax_burden: quote.tax_burden,
            final_price: quote.final_price,
            simulated_profit: quote.simulated_profit,
        }
    }
}
