//! 조회 대상 PR과 저장소 식별자를 해석하는 모듈.

use std::fmt;

use anyhow::{Result, bail};
use url::Url;

pub const DEFAULT_HOST: &str = "github.com";

/// 저장소 식별자(host/owner/name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// `owner/name` 또는 `host/owner/name` 형식을 해석한다.
    pub fn parse_slug(input: &str, default_host: &str) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            bail!("invalid repository '{input}': expected OWNER/NAME");
        }

        match parts.as_slice() {
            [owner, name] => Ok(Self {
                host: default_host.to_string(),
                owner: owner.to_string(),
                name: strip_git_suffix(name).to_string(),
            }),
            [host, owner, name] => Ok(Self {
                host: host.to_string(),
                owner: owner.to_string(),
                name: strip_git_suffix(name).to_string(),
            }),
            _ => bail!("invalid repository '{input}': expected OWNER/NAME"),
        }
    }

    /// git remote URL(https, ssh://, scp 형식)을 해석한다.
    pub fn parse_remote_url(input: &str) -> Result<Self> {
        let raw = input.trim();

        // git@github.com:owner/repo.git
        if !raw.contains("://")
            && let Some((user_host, path)) = raw.split_once(':')
        {
            let host = user_host.rsplit('@').next().unwrap_or(user_host);
            return Self::from_path_segments(host, path, input);
        }

        let url = Url::parse(raw)?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("remote URL host is missing: {input}"))?;
        Self::from_path_segments(host, url.path(), input)
    }

    fn from_path_segments(host: &str, path: &str, input: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        // /owner/repo(.git)
        match segments.as_slice() {
            [owner, name] if !host.is_empty() => Ok(Self {
                host: host.to_string(),
                owner: owner.to_string(),
                name: strip_git_suffix(name).to_string(),
            }),
            _ => bail!("unsupported remote URL: {input}"),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// CLI 인자에서 해석한 PR 지정 방식.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrSelector {
    /// 번호만 지정(저장소는 컨텍스트에서 결정)
    Number(u64),
    /// PR URL로 저장소까지 지정
    Url { repo: RepoRef, number: u64 },
    /// 현재 브랜치의 열린 PR
    CurrentBranch,
}

impl PrSelector {
    /// `123`, `#123`, PR URL, 또는 미지정을 해석한다.
    pub fn parse(input: Option<&str>) -> Result<Self> {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::CurrentBranch);
        };

        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if let Ok(number) = digits.parse::<u64>() {
            if number == 0 {
                bail!("invalid PR number: {raw}");
            }
            return Ok(Self::Number(number));
        }

        if raw.contains("://") {
            return parse_pull_url(raw);
        }

        bail!("invalid PR number: {raw}")
    }

    /// PR URL에 포함된 저장소(있다면).
    pub fn repo(&self) -> Option<&RepoRef> {
        match self {
            PrSelector::Url { repo, .. } => Some(repo),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<u64> {
        match self {
            PrSelector::Number(n) => Some(*n),
            PrSelector::Url { number, .. } => Some(*number),
            PrSelector::CurrentBranch => None,
        }
    }
}

fn parse_pull_url(input: &str) -> Result<PrSelector> {
    let url = Url::parse(input)?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
        .to_string();

    let segments: Vec<String> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).map(ToString::to_string).collect())
        .unwrap_or_default();

    // /owner/repo/pull/<number>
    if segments.len() < 4 || segments[2] != "pull" {
        bail!("unsupported PR URL format: {input}");
    }
    let Ok(number) = segments[3].parse::<u64>() else {
        bail!("unsupported PR URL format: {input}");
    };

    Ok(PrSelector::Url {
        repo: RepoRef {
            host,
            owner: segments[0].clone(),
            name: segments[1].clone(),
        },
        number,
    })
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}
