use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("invalid version '{}', expected 'X.Y.Z'", s));
        }
        Ok(Self {
            major: parts[0].parse().map_err(|_| "invalid major")?,
            minor: parts[1].parse().map_err(|_| "invalid minor")?,
            patch: parts[2].parse().map_err(|_| "invalid patch")?,
        })
    }
}

/// Version of the schema compiler that produced a descriptor set.
///
/// Parsed from `X.Y.Z` or `X.Y.Z-suffix` and displayed with a leading `v`,
/// e.g. `v3.21.12` or `v4.0.0-rc2`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct CompilerVersion {
    version: Version,
    suffix: Option<String>,
}

impl CompilerVersion {
    pub fn new(version: Version, suffix: Option<String>) -> Self {
        Self { version, suffix }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl TryFrom<String> for CompilerVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for CompilerVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = self.version.to_string();
        if let Some(suffix) = &self.suffix {
            s.push('-');
            s.push_str(suffix);
        }
        serializer.serialize_str(&s)
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

impl FromStr for CompilerVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('v').unwrap_or(s);
        let (version, suffix) = match s.split_once('-') {
            Some((_, "")) => return Err(format!("invalid version '{}', empty suffix", s)),
            Some((version, suffix)) => (version, Some(suffix.to_string())),
            None => (s, None),
        };
        Ok(Self {
            version: version.parse()?,
            suffix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::default().to_string(), "0.0.0");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
        assert_eq!(
            "10.20.30".parse::<Version>().unwrap(),
            Version::new(10, 20, 30)
        );
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("1.2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("a.b.c".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_compiler_version_display() {
        let plain = CompilerVersion::new(Version::new(3, 21, 12), None);
        assert_eq!(plain.to_string(), "v3.21.12");

        let rc = CompilerVersion::new(Version::new(4, 0, 0), Some("rc2".to_string()));
        assert_eq!(rc.to_string(), "v4.0.0-rc2");
    }

    #[test]
    fn test_compiler_version_from_str() {
        let v: CompilerVersion = "3.21.12".parse().unwrap();
        assert_eq!(v.version(), &Version::new(3, 21, 12));
        assert_eq!(v.suffix(), None);

        let v: CompilerVersion = "v25.1.0-dev".parse().unwrap();
        assert_eq!(v.version(), &Version::new(25, 1, 0));
        assert_eq!(v.suffix(), Some("dev"));

        assert!("3.21.12-".parse::<CompilerVersion>().is_err());
        assert!("3.21".parse::<CompilerVersion>().is_err());
    }

    #[test]
    fn test_compiler_version_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            compiler: CompilerVersion,
        }
        let config: Config = toml::from_str(r#"compiler = "3.21.12-rc1""#).unwrap();
        assert_eq!(config.compiler.to_string(), "v3.21.12-rc1");
    }

    #[test]
    fn test_compiler_version_serialize() {
        #[derive(Serialize)]
        struct Config {
            compiler: CompilerVersion,
        }
        let config = Config {
            compiler: "3.21.12-rc1".parse().unwrap(),
        };
        let toml = toml::to_string(&config).unwrap();
        assert_eq!(toml.trim(), r#"compiler = "3.21.12-rc1""#);
    }
}
