use std::{collections::BTreeMap, fmt, sync::Arc};

/// Keyed error used by the settings and driver layers.
///
/// The math modules never produce one: their only failure modes are the
/// numeric guards, which correct silently.
#[derive(Debug, Clone)]
pub struct LabError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<LabCause>,
}

#[derive(Debug, Clone)]
pub enum LabCause {
    Lab(Box<LabError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl LabError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_lab(mut self, cause: LabError) -> Self {
        self.causes.push(LabCause::Lab(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(LabCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for LabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for LabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            LabCause::Lab(e) => Some(e.as_ref() as &dyn std::error::Error),
            LabCause::Std(e) => Some(e.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_lists_args_in_key_order() {
        let err = LabError::new("settings-load")
            .with_arg("path", "/tmp/a.toml")
            .with_arg("field", "camera");
        assert_eq!(err.to_string(), "settings-load(field=camera, path=/tmp/a.toml)");
    }

    #[test]
    fn source_returns_first_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = LabError::new("settings-load").push_std(io);
        assert_eq!(err.source().map(|e| e.to_string()), Some("missing".to_string()));
    }

    #[test]
    fn nested_lab_error_is_a_source() {
        let inner = LabError::new("inner");
        let outer = LabError::new("outer").push_lab(inner);
        assert_eq!(outer.source().map(|e| e.to_string()), Some("inner()".to_string()));
    }
}
