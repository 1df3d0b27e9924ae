//! List price formula and profit simulation.
//!
//! Everything is plain `f64` arithmetic with no rounding; formatting is left
//! to whoever presents the numbers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{CommissionCost, CostProfile, TaxClassification, TunableParameters};
use crate::{PricingError, PricingResult};

/// Share of the average ICMS and PIS/COFINS folded into the cost
const BLEND_SHARE: f64 = 0.4;
/// Share of ICMS considered in the tax credit terms
const ICMS_CREDIT_SHARE: f64 = 0.60;
/// Invoiced cost surcharge
const INVOICE_SURCHARGE: f64 = 0.01;

/// Every term produced while pricing one SKU
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub icms_blend: f64,
    pub pis_cofins_blend: f64,
    /// Commission as a fraction (percent / 100)
    pub commission_rate: f64,
    pub avg_cost: f64,

    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
    pub i4: f64,
    pub res1: f64,

    pub i6: f64,
    pub i7: f64,
    pub i8: f64,
    pub i9: f64,

    pub res3: f64,
    pub tax_burden: f64,

    pub final_price: f64,
    pub simulated_profit: f64,
}

/// Inputs of the profit simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSimulation {
    pub price: f64,
    pub avg_cost: f64,
    pub invoiced_avg_cost: f64,
    pub freight: f64,
    pub rebate_rate: f64,
    pub res1: f64,
    pub i9: f64,
    pub operation_rate: f64,
    pub commission_rate: f64,
    pub fcp_rate: f64,
}

/// Freight net of the negotiated rebate
fn net_freight(freight: f64, rebate_rate: f64) -> f64 {
    freight - freight * rebate_rate
}

/// Profit ratio implied by selling at `sim.price`.
///
/// A zero price is accepted; only a denominator that is exactly zero fails.
pub fn simulate_profit(sim: &ProfitSimulation) -> PricingResult<f64> {
    let l1 = sim.avg_cost + sim.invoiced_avg_cost * INVOICE_SURCHARGE;
    let l2 = net_freight(sim.freight, sim.rebate_rate);
    let l3 = l1 + l2;
    let l4 = sim.price * (sim.res1 + sim.i9 + sim.operation_rate + sim.commission_rate + sim.fcp_rate);
    let l5 = l4 + l3;
    let l6 = sim.price - l5;
    let l7 = l6 * 100.0;

    if l7 == 0.0 {
        return Err(PricingError::ZeroProfitDenominator);
    }

    Ok((sim.price / l7) / 100.0)
}

/// Compute the list price for a SKU and the profit implied by `user_price`.
pub fn compute_price(
    cost: &CostProfile,
    params: &TunableParameters,
    commission: &CommissionCost,
    tax: &TaxClassification,
    user_price: f64,
) -> PricingResult<PriceQuote> {
    let icms = tax.effective_icms;
    let difal = tax.difal;

    let icms_blend = cost.icms_avg * BLEND_SHARE;
    let pis_cofins_blend = cost.pis_cofins_avg * BLEND_SHARE;
    let commission_rate = commission.commission_rate / 100.0;
    let avg_cost = cost.net_avg_cost + icms_blend + pis_cofins_blend;
    debug!(icms_blend, pis_cofins_blend, commission_rate, avg_cost, "Cost terms computed");

    let i1 = (params.pis_rate + params.cofins_rate) * params.reduction_factor;
    let i2 = icms - difal;
    let i3 = (i2 + icms) / 2.0;
    let i4 = 1.0 - i3;
    let res1 = i4 * i1;

    let i6 = icms * ICMS_CREDIT_SHARE;
    let i7 = (icms - difal) * ICMS_CREDIT_SHARE;
    let i8 = i7 + difal;
    let i9 = (i8 + i6) / 2.0;

    let res3 = params.operation_rate
        + commission_rate
        + params.standard_profit_margin
        + params.fcp_rate;
    let tax_burden = 1.0 - (res1 + i9 + res3);
    debug!(i1, i2, i3, i4, res1, i6, i7, i8, i9, res3, tax_burden, "Tax terms computed");

    if tax_burden == 0.0 {
        return Err(PricingError::ZeroTaxBurden);
    }

    let simulated_profit = simulate_profit(&ProfitSimulation {
        price: user_price,
        avg_cost,
        invoiced_avg_cost: cost.invoiced_avg_cost,
        freight: commission.freight,
        rebate_rate: params.rebate_rate,
        res1,
        i9,
        operation_rate: params.operation_rate,
        commission_rate,
        fcp_rate: params.fcp_rate,
    })?;

    let final_price = (avg_cost
        + cost.invoiced_avg_cost * INVOICE_SURCHARGE
        + net_freight(commission.freight, params.rebate_rate))
        / tax_burden;
    debug!(final_price, simulated_profit, "List price computed");

    Ok(PriceQuote {
        icms_blend,
        pis_cofins_blend,
        commission_rate,
        avg_cost,
        i1,
        i2,
        i3,
        i4,
        res1,
        i6,
        i7,
        i8,
        i9,
        res3,
        tax_burden,
        final_price,
        simulated_profit,
    })
}
