use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolve the user's home directory from the environment.
///
/// Returns `HOME`, falling back to `USERPROFILE` on Windows, or an empty
/// value when neither is set. Values are kept as `OsString` so a home
/// directory that is not valid UTF-8 still resolves.
pub fn home_dir() -> OsString {
    home_dir_with(|key| std::env::var_os(key))
}

/// Same as [`home_dir`] but reads variables through `lookup`
pub fn home_dir_with<F>(lookup: F) -> OsString
where
    F: Fn(&str) -> Option<OsString>,
{
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// `<home>/.kube/config`
pub fn kubeconfig_under(home: impl AsRef<Path>) -> PathBuf {
    home.as_ref().join(".kube").join("config")
}

/// Default kubeconfig location, or `None` when no home directory resolves
pub fn default_kubeconfig() -> Option<PathBuf> {
    default_kubeconfig_for(home_dir())
}

/// [`default_kubeconfig`] for an already resolved home directory
pub fn default_kubeconfig_for(home: OsString) -> Option<PathBuf> {
    (!home.is_empty()).then(|| kubeconfig_under(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, OsString> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect()
    }

    #[test]
    fn test_home_prefers_unix_variable() {
        let vars = env(&[("HOME", "/home/dev"), ("USERPROFILE", r"C:\Users\dev")]);
        assert_eq!(home_dir_with(|k| vars.get(k).cloned()), "/home/dev");
    }

    #[test]
    fn test_home_falls_back_to_userprofile() {
        let vars = env(&[("USERPROFILE", r"C:\Users\dev")]);
        assert_eq!(home_dir_with(|k| vars.get(k).cloned()), r"C:\Users\dev");

        // An empty HOME counts as unset
        let vars = env(&[("HOME", ""), ("USERPROFILE", r"C:\Users\dev")]);
        assert_eq!(home_dir_with(|k| vars.get(k).cloned()), r"C:\Users\dev");
    }

    #[test]
    fn test_home_empty_when_nothing_set() {
        let vars = env(&[]);
        assert_eq!(home_dir_with(|k| vars.get(k).cloned()), "");
    }

    #[test]
    fn test_kubeconfig_under_home() {
        assert_eq!(
            kubeconfig_under("/home/dev"),
            PathBuf::from("/home/dev/.kube/config")
        );
    }

    #[test]
    fn test_default_kubeconfig_follows_home() {
        assert_eq!(
            default_kubeconfig_for(OsString::from("/home/dev")),
            Some(PathBuf::from("/home/dev/.kube/config"))
        );
        assert_eq!(default_kubeconfig_for(OsString::new()), None);

        let home = home_dir();
        match default_kubeconfig() {
            Some(path) => assert_eq!(path, kubeconfig_under(home)),
            None => assert!(home.is_empty()),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_is_kept() {
        use std::os::unix::ffi::OsStringExt;

        let home = OsString::from_vec(b"/home/d\xffv".to_vec());
        let lookup = |key: &str| match key {
            "HOME" => Some(home.clone()),
            "USERPROFILE" => Some(OsString::from(r"C:\Users\dev")),
            _ => None,
        };
        assert_eq!(home_dir_with(lookup), home);
        assert_eq!(
            default_kubeconfig_for(home.clone()),
            Some(PathBuf::from(&home).join(".kube").join("config"))
        );
    }
}
