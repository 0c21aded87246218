//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::target::DEFAULT_HOST;

pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// `OWNER/NAME`만 주어졌을 때 사용할 호스트
    pub host: Option<String>,
    /// 저장소 추론에 사용할 git remote 이름
    pub remote: Option<String>,
    /// 커밋별 check run 조회 여부(기본 true)
    pub fetch_checks: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// 토큰을 stdout으로 출력하는 커맨드(예: ["gh","auth","token"])
    pub token_command: Option<Vec<String>>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

impl Config {
    pub fn default_host(&self) -> &str {
        self.defaults.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn remote(&self) -> &str {
        self.defaults.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    pub fn fetch_checks(&self) -> bool {
        self.defaults.fetch_checks.unwrap_or(true)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.remote.is_some() {
            self.remote = other.remote;
        }
        if other.fetch_checks.is_some() {
            self.fetch_checks = other.fetch_checks;
        }
    }
}

impl HostConfig {
    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.token_command.is_some() {
            self.token_command = other.token_command;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
