use async_trait::async_trait;
use sqlx::PgPool;
use tabela_core::repository::{CostProfileRepository, ParameterRepository};
use tabela_core::{CostProfile, TunableParameters};

/// Cost snapshots and tuning parameters kept in the pricing Postgres database
pub struct PostgresPricingRepository {
    pool: PgPool,
}

impl PostgresPricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CostProfileRow {
    cmp_icms: f64,
    cmp_pis_cofins: f64,
    cmp: f64,
    cmp_nf: f64,
}

impl From<CostProfileRow> for CostProfile {
    fn from(row: CostProfileRow) -> Self {
        Self {
            icms_avg: row.cmp_icms,
            pis_cofins_avg: row.cmp_pis_cofins,
            net_avg_cost: row.cmp,
            invoiced_avg_cost: row.cmp_nf,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParametersRow {
    lucro_adicional_desejado: f64,
    lucro_padrao_desejado: f64,
    imposto_federal: f64,
    operacao: f64,
    custo_fixo: f64,
    aliquota_pis: f64,
    aliquota_cofins: f64,
    rebate: f64,
    fcp: f64,
    redutor_padrao: f64,
}

impl From<ParametersRow> for TunableParameters {
    fn from(row: ParametersRow) -> Self {
        Self {
            additional_profit_margin: row.lucro_adicional_desejado,
            standard_profit_margin: row.lucro_padrao_desejado,
            federal_tax_rate: row.imposto_federal,
            operation_rate: row.operacao,
            fixed_cost: row.custo_fixo,
            pis_rate: row.aliquota_pis,
            cofins_rate: row.aliquota_cofins,
            rebate_rate: row.rebate,
            fcp_rate: row.fcp,
            reduction_factor: row.redutor_padrao,
        }
    }
}

// `produto` is compared as text so the SKU binds the same way whatever the column type.
const COST_PROFILE_QUERY: &str = r#"
    SELECT cmp_icms::FLOAT8 AS cmp_icms,
           cmp_pis_cofins::FLOAT8 AS cmp_pis_cofins,
           cmp::FLOAT8 AS cmp,
           cmp_nf::FLOAT8 AS cmp_nf
    FROM productscmp
    WHERE produto::TEXT = $1
      AND index = (
          SELECT max_index
          FROM productscmp
          WHERE produto::TEXT = $1
          LIMIT 1
      )
"#;

const PARAMETERS_QUERY: &str = r#"
    SELECT lucro_adicional_desejado::FLOAT8 AS lucro_adicional_desejado,
           lucro_padrao_desejado::FLOAT8 AS lucro_padrao_desejado,
           imposto_federal::FLOAT8 AS imposto_federal,
           operacao::FLOAT8 AS operacao,
           custo_fixo::FLOAT8 AS custo_fixo,
           aliquota_pis::FLOAT8 AS aliquota_pis,
           aliquota_cofins::FLOAT8 AS aliquota_cofins,
           rebate::FLOAT8 AS rebate,
           fcp::FLOAT8 AS fcp,
           redutor_padrao::FLOAT8 AS redutor_padrao
    FROM config_params
    WHERE id = 1
"#;

#[async_trait]
impl CostProfileRepository for PostgresPricingRepository {
    async fn fetch_cost_profile(
        &self,
        sku: &str,
    ) -> Result<Option<CostProfile>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, CostProfileRow>(COST_PROFILE_QUERY)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CostProfile::from))
    }
}

#[async_trait]
impl ParameterRepository for PostgresPricingRepository {
    async fn fetch_tunable_parameters(
        &self,
    ) -> Result<Option<TunableParameters>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, ParametersRow>(PARAMETERS_QUERY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TunableParameters::from))
    }
}
