//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_host_token;
use crate::application::config::{DefaultsConfig, HostConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub hosts: BTreeMap<String, HostInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub host: String,
    pub remote: String,
    pub fetch_checks: bool,
}

/// 토큰 값 자체는 노출하지 않고 출처와 해석 여부만 보여준다.
#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let mut hosts = BTreeMap::new();
        for (host, cfg) in &loaded.config.hosts {
            hosts.insert(host.clone(), host_inspection(cfg));
        }

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                host: loaded.config.default_host().to_string(),
                remote: loaded.config.remote().to_string(),
                fetch_checks: loaded.config.fetch_checks(),
            },
            hosts,
        }
    }
}

fn host_inspection(cfg: &HostConfig) -> HostInspection {
    let resolution = resolve_host_token(Some(cfg)).unwrap_or_default();
    HostInspection {
        token_source: resolution.source,
        token_resolved: resolution.token.is_some(),
        api_base: cfg.api_base.clone(),
    }
}
