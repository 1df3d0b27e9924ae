use async_trait::async_trait;
use rsfbclient::prelude::*;
use tabela_core::repository::{CommissionRepository, FiscalProfileRepository};
use tabela_core::CommissionCost;
use tracing::{debug, info};

use crate::firebird::FirebirdClient;

/// Suffix the sales channel appends to SKUs in `np_comissao_frete`
const CHANNEL_SKU_SUFFIX: &str = "_0_0_U";

pub fn channel_sku(sku: &str) -> String {
    format!("{}{}", sku, CHANNEL_SKU_SUFFIX)
}

const COMMISSION_QUERY: &str = "
    SELECT n.sku, n.cod_produto, p.departamento, n.comissao, n.preco
    FROM np_comissao_frete n
    JOIN produtos p ON p.cod_produto = n.cod_produto
    WHERE n.sku = ?";

const REDUCTION_SUM_QUERY: &str = "
    SELECT SUM(RED_ICMS)
    FROM IMPOSTOS_PERFIL
    WHERE perfil_imposto = (
        SELECT perfil_imposto FROM produtos WHERE produto = ?
    )";

const ORIGIN_QUERY: &str = "SELECT origem_prod FROM produtos WHERE produto = ?";

type CommissionRow = (String, i64, Option<String>, f64, f64);

pub struct FirebirdCommissionRepository {
    client: FirebirdClient,
}

impl FirebirdCommissionRepository {
    pub fn new(client: FirebirdClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommissionRepository for FirebirdCommissionRepository {
    async fn fetch_commission_cost(
        &self,
        sku: &str,
    ) -> Result<Option<CommissionCost>, Box<dyn std::error::Error + Send + Sync>> {
        let key = channel_sku(sku);
        debug!(sku, channel_sku = %key, "Looking up channel commission");

        let param = key.clone();
        let row: Option<CommissionRow> = self
            .client
            .run(move |conn| conn.query_first(COMMISSION_QUERY, (param,)))
            .await?;

        let cost = row.map(|(sku, product_code, department, commission_rate, freight)| CommissionCost {
            sku,
            product_code,
            department,
            commission_rate,
            freight,
        });

        if let Some(c) = &cost {
            info!(
                department = c.department.as_deref().unwrap_or(""),
                commission_rate = c.commission_rate,
                freight = c.freight,
                "Commission fetched for {}", key
            );
        }

        Ok(cost)
    }
}

pub struct FirebirdFiscalRepository {
    client: FirebirdClient,
}

impl FirebirdFiscalRepository {
    pub fn new(client: FirebirdClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FiscalProfileRepository for FirebirdFiscalRepository {
    async fn fetch_reduction_sum(
        &self,
        product_id: i64,
    ) -> Result<Option<f64>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<(Option<f64>,)> = self
            .client
            .run(move |conn| conn.query_first(REDUCTION_SUM_QUERY, (product_id,)))
            .await?;

        Ok(row.and_then(|(sum,)| sum))
    }

    async fn fetch_origin_code(
        &self,
        product_id: i64,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<(Option<String>,)> = self
            .client
            .run(move |conn| conn.query_first(ORIGIN_QUERY, (product_id,)))
            .await?;

        Ok(row.and_then(|(code,)| code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sku() {
        assert_eq!(channel_sku("1234"), "1234_0_0_U");
        assert_eq!(channel_sku("3000000000"), "3000000000_0_0_U");
    }
}
