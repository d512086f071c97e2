use crate::error::{LabopsError, Result};
use glob::glob;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ROUTE_FILE_PATTERN: &str = "**/ingressroute.yaml";
const HOST_PATTERN: &str = r"Host\(`([^`]+)`\)";

/// A candidate catalog entry discovered from an IngressRoute manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredService {
    pub name: String,
    pub namespace: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct RouteManifest {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: RouteMetadata,
    #[serde(default)]
    spec: RouteSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RouteMetadata {
    #[serde(default)]
    namespace: String,
}

#[derive(Debug, Default, Deserialize)]
struct RouteSpec {
    #[serde(default)]
    routes: Vec<RouteRule>,
}

#[derive(Debug, Default, Deserialize)]
struct RouteRule {
    #[serde(default)]
    r#match: String,
}

/// RouteScannerAgent walks an infrastructure-as-code tree for IngressRoute
/// manifests and turns each distinct hostname into a catalog candidate.
pub struct RouteScannerAgent {
    routes_dir: PathBuf,
}

impl RouteScannerAgent {
    pub fn new<P: AsRef<Path>>(routes_dir: P) -> Self {
        Self {
            routes_dir: routes_dir.as_ref().to_path_buf(),
        }
    }

    /// Collect one candidate per distinct service name. Unreadable or
    /// malformed files are reported and skipped, never fatal to the sweep.
    pub fn scan(&self) -> Result<Vec<DiscoveredService>> {
        let host_pattern = Regex::new(HOST_PATTERN)
            .map_err(|e| LabopsError::Config(format!("Invalid host pattern: {e}")))?;

        let pattern = format!("{}/{}", self.routes_dir.display(), ROUTE_FILE_PATTERN);
        let paths = glob(&pattern)
            .map_err(|e| LabopsError::Config(format!("Invalid glob pattern '{pattern}': {e}")))?;

        let mut seen = HashSet::new();
        let mut services = Vec::new();

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    println!("Error accessing route file: {e}");
                    continue;
                }
            };

            match self.scan_file(&path, &host_pattern) {
                Ok(found) => {
                    for service in found {
                        if seen.insert(service.name.clone()) {
                            services.push(service);
                        }
                    }
                }
                Err(e) => println!("Error processing {}: {e}", path.display()),
            }
        }

        Ok(services)
    }

    fn scan_file(&self, path: &Path, host_pattern: &Regex) -> Result<Vec<DiscoveredService>> {
        let content = fs::read_to_string(path)?;
        let mut found = Vec::new();

        for document in serde_yaml::Deserializer::from_str(&content) {
            let manifest = match RouteManifest::deserialize(document) {
                Ok(manifest) => manifest,
                Err(e) => {
                    println!("Skipping malformed document in {}: {e}", path.display());
                    continue;
                }
            };

            if manifest.kind.as_deref() != Some("IngressRoute") {
                continue;
            }

            if let Some(service) = extract_service(&manifest, path, host_pattern) {
                found.push(service);
            }
        }

        Ok(found)
    }
}

fn extract_service(
    manifest: &RouteManifest,
    path: &Path,
    host_pattern: &Regex,
) -> Option<DiscoveredService> {
    let rule = manifest.spec.routes.first()?;
    let host = host_pattern.captures(&rule.r#match)?.get(1)?.as_str();

    Some(DiscoveredService {
        name: service_name_for(path)?,
        namespace: manifest.metadata.namespace.clone(),
        url: format!("https://{host}"),
    })
}

/// The service name comes from the manifest's parent directory; a `staging`
/// directory defers to its parent.
fn service_name_for(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    let dir_name = parent.file_name()?.to_string_lossy();
    if dir_name == "staging" {
        let app_dir = parent.parent()?.file_name()?.to_string_lossy();
        Some(app_dir.to_string())
    } else {
        Some(dir_name.to_string())
    }
}
