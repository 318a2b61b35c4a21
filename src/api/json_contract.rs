use serde::{Deserialize, Serialize};

use crate::core::types::{ChartData, InternalData};
use crate::error::{ChartError, ChartResult};

use super::axis_config::AxisScaleConfig;

pub const CHART_DATA_JSON_SCHEMA_V1: u32 = 1;
pub const AXIS_SCALE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataJsonContractV1 {
    pub schema_version: u32,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScaleConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: AxisScaleConfig,
}

impl ChartData {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartDataJsonContractV1 {
            schema_version: CHART_DATA_JSON_SCHEMA_V1,
            data: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart data contract v1: {e}"))
        })
    }

    /// Accepts either a bare dataset or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(data) = serde_json::from_str::<ChartData>(input) {
            return Ok(data);
        }
        let payload: ChartDataJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart data json payload: {e}"))
        })?;
        if payload.schema_version != CHART_DATA_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart data schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.data)
    }
}

impl AxisScaleConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = AxisScaleConfigJsonContractV1 {
            schema_version: AXIS_SCALE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize axis config contract v1: {e}"))
        })
    }

    /// Parses and validates an axis config, bare or versioned.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config = if let Ok(config) = serde_json::from_str::<AxisScaleConfig>(input) {
            config
        } else {
            let payload: AxisScaleConfigJsonContractV1 =
                serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse axis config json payload: {e}"))
                })?;
            if payload.schema_version != AXIS_SCALE_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported axis config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        };
        config.validate()?;
        Ok(config)
    }
}

impl InternalData {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize internal data json: {e}"))
        })
    }
}
