use anyhow::{bail, Error, Result};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    Web,
    Mobile,
    Other,
}

impl Category {
    /// The value stored in the database
    pub fn code(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Web => "Web",
            Self::Mobile => "Mobile",
            Self::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI & Data Science",
            Self::Web => "Web Development",
            Self::Mobile => "Mobile Development",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        Ok(match code {
            "AI" => Self::Ai,
            "Web" => Self::Web,
            "Mobile" => Self::Mobile,
            "Other" => Self::Other,
            _ => bail!("Invalid project category {code}"),
        })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

impl Timeframe {
    pub fn code(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "1-2 Years",
            Self::Medium => "3-4 Years",
            Self::Long => "5+ Years",
        }
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        Ok(match code {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "long" => Self::Long,
            _ => bail!("Invalid career goal timeframe {code}"),
        })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum DegreeLevel {
    #[serde(rename = "High School")]
    HighSchool,
    Undergraduate,
    Graduate,
    Postgraduate,
}

impl DegreeLevel {
    /// Degree levels are stored and displayed by the same name
    pub fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::Undergraduate => "Undergraduate",
            Self::Graduate => "Graduate",
            Self::Postgraduate => "Postgraduate",
        }
    }
}
