use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bw_core::{
    ClientHistory, ClientManifest, ClientState, ClientStatus, CoreError, RegistryIndex,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::error::RegistryError;
use crate::legacy;
use crate::types::{ManifestPatch, NewClient, RegistrySummary, StatePatch};

const INDEX_FILE: &str = "index.json";
const CLIENTS_DIR: &str = "clients";
const MANIFEST_FILE: &str = "manifest.json";
const STATE_FILE: &str = "state.json";
const HISTORY_FILE: &str = "history.json";
const LEGACY_FILE: &str = "clients.yml";

/// In-memory view of the on-disk registry at `~/.blackwell/registry/`.
///
/// Every mutating operation persists the affected client files first and the
/// index last. There is no cross-process locking; concurrent CLI invocations
/// can race and the last writer wins.
#[derive(Debug)]
pub struct ClientRegistry {
    root: PathBuf,
    manifests: BTreeMap<String, ClientManifest>,
    states: BTreeMap<String, ClientState>,
    histories: BTreeMap<String, ClientHistory>,
    index: RegistryIndex,
}

impl ClientRegistry {
    /// Open (or initialize) the registry rooted at `root`.
    ///
    /// An existing `clients/` tree is loaded into memory; a client directory
    /// with a missing or unreadable `manifest.json` is logged and skipped,
    /// while missing state/history files get defaults. When no registry
    /// exists but a legacy `clients.yml` sits next to `root`, it is migrated
    /// into the new layout before loading.
    pub fn open(root: &Path) -> Result<Self, RegistryError> {
        let clients_dir = root.join(CLIENTS_DIR);
        std::fs::create_dir_all(&clients_dir).map_err(|e| RegistryError::io(&clients_dir, e))?;

        let mut registry = Self {
            root: root.to_path_buf(),
            manifests: BTreeMap::new(),
            states: BTreeMap::new(),
            histories: BTreeMap::new(),
            index: RegistryIndex::default(),
        };

        let has_clients = std::fs::read_dir(&clients_dir)
            .map_err(|e| RegistryError::io(&clients_dir, e))?
            .next()
            .is_some();

        if has_clients {
            registry.load_clients(&clients_dir)?;
            registry.load_index();
        } else if let Some(legacy_path) = registry.legacy_path() {
            info!(path = %legacy_path.display(), "migrating legacy client registry");
            registry.migrate_legacy(&legacy_path)?;
        } else {
            registry.save_index()?;
        }

        Ok(registry)
    }

    /// Register a new client. The manifest is validated up front and the
    /// initial state is a draft carrying the generated stack name.
    pub fn create(&mut self, new: NewClient) -> Result<ClientManifest, RegistryError> {
        if self.manifests.contains_key(&new.client_id) {
            return Err(CoreError::client_exists(new.client_id).into());
        }

        let manifest = ClientManifest {
            schema: schema_url("manifest"),
            schema_version: "1.1".to_string(),
            client_id: new.client_id.clone(),
            company_name: new.company_name,
            domain: new.domain,
            contact_email: new.contact_email,
            service_tier: new.service_tier,
            management_model: new.management_model,
            cms_provider: new.cms_provider,
            ecommerce_provider: new.ecommerce_provider,
            ssg_engine: new.ssg_engine,
            integration_mode: new.integration_mode,
            cms_settings: new.cms_settings,
            ecommerce_settings: new.ecommerce_settings,
            aws_region: new.aws_region,
            notes: new.notes,
            tags: new.tags,
            created_at: Utc::now(),
        };

        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(CoreError::Validation(issues.join("; ")).into());
        }

        let state = ClientState::new_draft(manifest.stack_name());
        let mut history = ClientHistory::default();
        history.record(
            "create",
            state.status.as_str(),
            BTreeMap::from([
                ("cms_provider".to_string(), json!(manifest.cms_provider)),
                (
                    "ecommerce_provider".to_string(),
                    json!(manifest.ecommerce_provider),
                ),
                ("ssg_engine".to_string(), json!(manifest.ssg_engine)),
            ]),
        );

        let id = manifest.client_id.clone();
        self.manifests.insert(id.clone(), manifest.clone());
        self.states.insert(id.clone(), state);
        self.histories.insert(id.clone(), history);
        self.persist(&id)?;

        Ok(manifest)
    }

    pub fn get(&self, client_id: &str) -> Result<&ClientManifest, RegistryError> {
        self.manifests
            .get(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id).into())
    }

    pub fn state(&self, client_id: &str) -> Result<&ClientState, RegistryError> {
        self.states
            .get(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id).into())
    }

    pub fn history(&self, client_id: &str) -> Result<&ClientHistory, RegistryError> {
        self.histories
            .get(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id).into())
    }

    /// Manifest, state, and history together.
    pub fn get_full(
        &self,
        client_id: &str,
    ) -> Result<(&ClientManifest, &ClientState, &ClientHistory), RegistryError> {
        Ok((
            self.get(client_id)?,
            self.state(client_id)?,
            self.history(client_id)?,
        ))
    }

    /// Apply a partial manifest update. The merged manifest is re-validated
    /// before anything is written; when a provider field changes, the stack
    /// name is regenerated on the state record.
    pub fn update_manifest(
        &mut self,
        client_id: &str,
        patch: ManifestPatch,
    ) -> Result<ClientManifest, RegistryError> {
        let manifest = self
            .manifests
            .get(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id))?;

        let mut updated = manifest.clone();
        let mut changed: Vec<&str> = Vec::new();

        macro_rules! merge {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    updated.$field = value;
                    changed.push(stringify!($field));
                }
            };
        }
        merge!(company_name);
        merge!(domain);
        merge!(contact_email);
        merge!(cms_provider);
        merge!(ecommerce_provider);
        merge!(ssg_engine);
        merge!(integration_mode);
        merge!(service_tier);
        merge!(management_model);
        merge!(aws_region);
        merge!(notes);

        let issues = updated.validate();
        if !issues.is_empty() {
            return Err(CoreError::Validation(issues.join("; ")).into());
        }

        let providers_changed = changed
            .iter()
            .any(|f| matches!(*f, "cms_provider" | "ecommerce_provider" | "ssg_engine"));

        let state = self
            .states
            .get_mut(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id))?;
        if providers_changed {
            state.stack_name = Some(updated.stack_name());
        }
        state.touch();

        let status = state.status.as_str();
        if let Some(history) = self.histories.get_mut(client_id) {
            history.record(
                "update",
                status,
                BTreeMap::from([("changed_fields".to_string(), json!(changed))]),
            );
        }

        self.manifests.insert(client_id.to_string(), updated.clone());
        self.persist(client_id)?;
        Ok(updated)
    }

    /// Apply a partial state update.
    pub fn update_state(
        &mut self,
        client_id: &str,
        patch: StatePatch,
    ) -> Result<ClientState, RegistryError> {
        let state = self
            .states
            .get_mut(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id))?;

        if let Some(status) = patch.status {
            state.status = status;
        }
        if let Some(cost) = patch.estimated_monthly_cost {
            state.estimated_monthly_cost = Some(cost);
        }
        if let Some(cost) = patch.actual_monthly_cost {
            state.actual_monthly_cost = Some(cost);
        }
        if let Some(stack_id) = patch.aws_stack_id {
            state.aws_stack_id = stack_id;
        }
        if let Some(drift) = patch.drift_detected {
            state.drift_detected = drift;
        }
        if let Some(at) = patch.last_deployed_at {
            state.last_deployed_at = Some(at);
        }
        state.touch();

        let snapshot = state.clone();
        if let Some(history) = self.histories.get_mut(client_id) {
            history.record("update", snapshot.status.as_str(), BTreeMap::new());
        }

        self.persist(client_id)?;
        Ok(snapshot)
    }

    /// Transition a client to a new status, recording the change in history.
    /// Moving to `deployed` stamps `last_deployed_at`.
    pub fn set_status(
        &mut self,
        client_id: &str,
        status: ClientStatus,
        details: BTreeMap<String, Value>,
    ) -> Result<(), RegistryError> {
        let state = self
            .states
            .get_mut(client_id)
            .ok_or_else(|| CoreError::client_not_found(client_id))?;

        let old_status = state.status;
        state.status = status;
        if status == ClientStatus::Deployed {
            state.last_deployed_at = Some(Utc::now());
        }
        state.touch();

        if let Some(history) = self.histories.get_mut(client_id) {
            let mut details = details;
            details.insert("old_status".to_string(), json!(old_status.as_str()));
            history.record("status_change", status.as_str(), details);
        }

        self.persist(client_id)
    }

    /// Remove a client and its directory. Returns `false` when the client
    /// does not exist.
    pub fn delete(&mut self, client_id: &str) -> Result<bool, RegistryError> {
        if self.manifests.remove(client_id).is_none() {
            return Ok(false);
        }
        let status = self.states.remove(client_id).map(|state| state.status);

        // Closing event lives in memory only; the files are gone after this
        // call.
        if let Some(history) = self.histories.get_mut(client_id) {
            history.record(
                "delete",
                status.unwrap_or_default().as_str(),
                BTreeMap::new(),
            );
        }
        self.histories.remove(client_id);

        let dir = self.client_dir(client_id);
        if dir.exists() {
            std::fs::remove_dir_all(&dir).map_err(|e| RegistryError::io(&dir, e))?;
        }

        self.index.remove(client_id);
        self.save_index()?;
        debug!(client_id, "client deleted");
        Ok(true)
    }

    /// List clients, optionally filtered, sorted by creation time.
    #[must_use]
    pub fn list(
        &self,
        status: Option<ClientStatus>,
        provider: Option<&str>,
    ) -> Vec<(&ClientManifest, &ClientState)> {
        let mut rows: Vec<_> = self
            .manifests
            .values()
            .filter_map(|manifest| {
                let state = self.states.get(&manifest.client_id)?;
                Some((manifest, state))
            })
            .filter(|(manifest, state)| {
                status.is_none_or(|s| state.status == s)
                    && provider.is_none_or(|p| {
                        manifest.cms_provider == p
                            || manifest.ecommerce_provider.as_deref() == Some(p)
                            || manifest.ssg_engine == p
                    })
            })
            .collect();
        rows.sort_by_key(|(manifest, _)| manifest.created_at);
        rows
    }

    /// Aggregate counts and cost sums across every client.
    #[must_use]
    pub fn summary(&self) -> RegistrySummary {
        let mut summary = RegistrySummary {
            total_clients: self.manifests.len(),
            ..RegistrySummary::default()
        };
        for (manifest, state) in self.manifests.values().filter_map(|m| {
            self.states.get(&m.client_id).map(|s| (m, s))
        }) {
            *summary
                .by_status
                .entry(state.status.as_str().to_string())
                .or_default() += 1;
            if !manifest.cms_provider.is_empty() {
                *summary
                    .by_cms_provider
                    .entry(manifest.cms_provider.clone())
                    .or_default() += 1;
            }
            if !manifest.ssg_engine.is_empty() {
                *summary
                    .by_ssg_engine
                    .entry(manifest.ssg_engine.clone())
                    .or_default() += 1;
            }
            summary.total_estimated_monthly_cost += state.estimated_monthly_cost.unwrap_or(0.0);
            summary.total_actual_monthly_cost += state.actual_monthly_cost.unwrap_or(0.0);
        }
        summary
    }

    #[must_use]
    pub fn contains(&self, client_id: &str) -> bool {
        self.manifests.contains_key(client_id)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    // --- Loading ---

    fn load_clients(&mut self, clients_dir: &Path) -> Result<(), RegistryError> {
        let entries =
            std::fs::read_dir(clients_dir).map_err(|e| RegistryError::io(clients_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| RegistryError::io(clients_dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let client_id = entry.file_name().to_string_lossy().into_owned();
            if let Err(err) = self.load_client(&client_id) {
                error!(client_id, %err, "skipping unreadable client");
            }
        }
        Ok(())
    }

    fn load_client(&mut self, client_id: &str) -> Result<(), RegistryError> {
        let dir = self.client_dir(client_id);

        let manifest: ClientManifest = read_json(&dir.join(MANIFEST_FILE))?;

        let state_path = dir.join(STATE_FILE);
        let state: ClientState = if state_path.exists() {
            read_json(&state_path)?
        } else {
            ClientState::default()
        };

        let history_path = dir.join(HISTORY_FILE);
        let history: ClientHistory = if history_path.exists() {
            read_json(&history_path)?
        } else {
            ClientHistory::default()
        };

        self.manifests.insert(client_id.to_string(), manifest);
        self.states.insert(client_id.to_string(), state);
        self.histories.insert(client_id.to_string(), history);
        Ok(())
    }

    /// The index is a derived artifact; when missing or unreadable it is
    /// rebuilt from the loaded clients.
    fn load_index(&mut self) {
        let path = self.root.join(INDEX_FILE);
        match read_json::<RegistryIndex>(&path) {
            Ok(index) => self.index = index,
            Err(err) => {
                debug!(%err, "rebuilding registry index");
                self.rebuild_index();
                let _ = self.save_index();
            }
        }
    }

    fn legacy_path(&self) -> Option<PathBuf> {
        let candidate = self.root.parent()?.join(LEGACY_FILE);
        candidate.exists().then_some(candidate)
    }

    fn migrate_legacy(&mut self, path: &Path) -> Result<(), RegistryError> {
        let migrated = legacy::parse(path)?;
        let count = migrated.len();
        for (manifest, state, history) in migrated {
            let id = manifest.client_id.clone();
            self.manifests.insert(id.clone(), manifest);
            self.states.insert(id.clone(), state);
            self.histories.insert(id.clone(), history);
            self.persist_client_files(&id)?;
        }
        self.rebuild_index();
        self.save_index()?;
        info!(count, "legacy migration complete");
        Ok(())
    }

    // --- Persistence ---

    fn client_dir(&self, client_id: &str) -> PathBuf {
        self.root.join(CLIENTS_DIR).join(client_id)
    }

    fn persist(&mut self, client_id: &str) -> Result<(), RegistryError> {
        self.persist_client_files(client_id)?;
        if let (Some(manifest), Some(state)) =
            (self.manifests.get(client_id), self.states.get(client_id))
        {
            self.index.upsert(manifest, state);
        }
        self.save_index()
    }

    fn persist_client_files(&self, client_id: &str) -> Result<(), RegistryError> {
        let dir = self.client_dir(client_id);
        std::fs::create_dir_all(&dir).map_err(|e| RegistryError::io(&dir, e))?;

        if let Some(manifest) = self.manifests.get(client_id) {
            write_json(&dir.join(MANIFEST_FILE), manifest)?;
        }
        if let Some(state) = self.states.get(client_id) {
            write_json(&dir.join(STATE_FILE), state)?;
        }
        if let Some(history) = self.histories.get(client_id) {
            write_json(&dir.join(HISTORY_FILE), history)?;
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = RegistryIndex::default();
        for (id, manifest) in &self.manifests {
            if let Some(state) = self.states.get(id) {
                self.index.upsert(manifest, state);
            }
        }
    }

    fn save_index(&self) -> Result<(), RegistryError> {
        write_json(&self.root.join(INDEX_FILE), &self.index)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| RegistryError::json(path, e))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), RegistryError> {
    let raw = serde_json::to_string_pretty(value).map_err(|e| RegistryError::json(path, e))?;
    std::fs::write(path, raw).map_err(|e| RegistryError::io(path, e))
}

fn schema_url(kind: &str) -> String {
    format!("https://blackwell.dev/schemas/{kind}.schema.json")
}

#[cfg(test)]
mod tests {
    use bw_core::IntegrationMode;
    use pretty_assertions::assert_eq;

    use super::*;

    fn new_client(id: &str) -> NewClient {
        NewClient {
            client_id: id.to_string(),
            company_name: "Acme Co".to_string(),
            domain: "acme.example".to_string(),
            contact_email: "ops@acme.example".to_string(),
            cms_provider: "decap".to_string(),
            ecommerce_provider: None,
            ssg_engine: "astro".to_string(),
            integration_mode: IntegrationMode::EventDriven,
            service_tier: "tier1".to_string(),
            management_model: "self_managed".to_string(),
            aws_region: "us-east-1".to_string(),
            cms_settings: BTreeMap::new(),
            ecommerce_settings: BTreeMap::new(),
            notes: String::new(),
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn create_persists_all_three_files_and_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");

        registry.create(new_client("acme-co")).expect("create");

        let client_dir = dir.path().join("clients").join("acme-co");
        assert!(client_dir.join("manifest.json").exists());
        assert!(client_dir.join("state.json").exists());
        assert!(client_dir.join("history.json").exists());
        assert!(dir.path().join("index.json").exists());

        let state = registry.state("acme-co").expect("state");
        assert_eq!(state.status, ClientStatus::Draft);
        assert_eq!(state.stack_name.as_deref(), Some("AcmeCo-Prod-DecapCmsTier"));
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");

        registry.create(new_client("acme-co")).expect("create");
        let err = registry.create(new_client("acme-co")).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Core(CoreError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn create_rejects_invalid_manifests() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");

        let mut bad = new_client("acme-co");
        bad.contact_email = "nope".to_string();
        let err = registry.create(bad).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Core(CoreError::Validation(_))
        ));
        assert!(!registry.contains("acme-co"));
    }

    #[test]
    fn reopen_reads_back_created_clients() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut registry = ClientRegistry::open(dir.path()).expect("open");
            registry.create(new_client("acme-co")).expect("create");
        }

        let registry = ClientRegistry::open(dir.path()).expect("reopen");
        let manifest = registry.get("acme-co").expect("get");
        assert_eq!(manifest.company_name, "Acme Co");
        let history = registry.history("acme-co").expect("history");
        assert_eq!(history.events[0].action, "create");
    }

    #[test]
    fn update_manifest_regenerates_stack_name_on_provider_change() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        registry.create(new_client("acme-co")).expect("create");

        let patch = ManifestPatch {
            ecommerce_provider: Some(Some("snipcart".to_string())),
            ..ManifestPatch::default()
        };
        let updated = registry.update_manifest("acme-co", patch).expect("update");

        assert_eq!(updated.ecommerce_provider.as_deref(), Some("snipcart"));
        let state = registry.state("acme-co").expect("state");
        assert_eq!(
            state.stack_name.as_deref(),
            Some("AcmeCo-Prod-DecapSnipcartComposedStack")
        );
    }

    #[test]
    fn update_manifest_rejects_direct_composed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        let mut composed = new_client("acme-co");
        composed.ecommerce_provider = Some("snipcart".to_string());
        registry.create(composed).expect("create");

        let patch = ManifestPatch {
            integration_mode: Some(IntegrationMode::Direct),
            ..ManifestPatch::default()
        };
        let err = registry.update_manifest("acme-co", patch).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Core(CoreError::Validation(_))
        ));
        // Stored manifest untouched.
        let manifest = registry.get("acme-co").expect("get");
        assert_eq!(manifest.integration_mode, IntegrationMode::EventDriven);
    }

    #[test]
    fn set_status_deployed_stamps_last_deployed_at() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        registry.create(new_client("acme-co")).expect("create");

        registry
            .set_status("acme-co", ClientStatus::Deployed, BTreeMap::new())
            .expect("set_status");

        let state = registry.state("acme-co").expect("state");
        assert_eq!(state.status, ClientStatus::Deployed);
        assert!(state.last_deployed_at.is_some());

        let history = registry.history("acme-co").expect("history");
        let last = history.events.last().expect("event");
        assert_eq!(last.action, "status_change");
        assert_eq!(last.details["old_status"], json!("draft"));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        registry.create(new_client("acme-co")).expect("create");

        assert!(registry.delete("acme-co").expect("delete"));
        assert!(!registry.delete("acme-co").expect("redelete"));
        assert!(!dir.path().join("clients").join("acme-co").exists());
    }

    #[test]
    fn list_filters_by_status_and_provider() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        registry.create(new_client("alpha")).expect("create");
        let mut hugo = new_client("beta");
        hugo.ssg_engine = "hugo".to_string();
        registry.create(hugo).expect("create");
        registry
            .set_status("alpha", ClientStatus::Deployed, BTreeMap::new())
            .expect("set_status");

        assert_eq!(registry.list(None, None).len(), 2);
        assert_eq!(registry.list(Some(ClientStatus::Deployed), None).len(), 1);
        let hugo_rows = registry.list(None, Some("hugo"));
        assert_eq!(hugo_rows.len(), 1);
        assert_eq!(hugo_rows[0].0.client_id, "beta");
    }

    #[test]
    fn summary_counts_statuses_and_costs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut registry = ClientRegistry::open(dir.path()).expect("open");
        registry.create(new_client("alpha")).expect("create");
        registry.create(new_client("beta")).expect("create");
        registry
            .update_state(
                "alpha",
                StatePatch {
                    status: Some(ClientStatus::Deployed),
                    estimated_monthly_cost: Some(70.3),
                    ..StatePatch::default()
                },
            )
            .expect("update_state");

        let summary = registry.summary();
        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.by_status["draft"], 1);
        assert_eq!(summary.by_status["deployed"], 1);
        assert_eq!(summary.by_cms_provider["decap"], 2);
        assert!((summary.total_estimated_monthly_cost - 70.3).abs() < f64::EPSILON);
    }

    #[test]
    fn open_migrates_legacy_clients_yml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry_dir = dir.path().join("registry");
        std::fs::write(
            dir.path().join("clients.yml"),
            concat!(
                "clients:\n",
                "  legacy-co:\n",
                "    company_name: Legacy Co\n",
                "    domain: legacy.example\n",
                "    contact_email: ops@legacy.example\n",
                "    cms_provider: tina\n",
                "    ssg_engine: nextjs\n",
                "    status: deployed\n",
            ),
        )
        .expect("write legacy file");

        let registry = ClientRegistry::open(&registry_dir).expect("open");
        let manifest = registry.get("legacy-co").expect("get");
        assert_eq!(manifest.cms_provider, "tina");
        assert!(registry_dir
            .join("clients")
            .join("legacy-co")
            .join("manifest.json")
            .exists());

        // A reopen loads from the migrated layout.
        let reopened = ClientRegistry::open(&registry_dir).expect("reopen");
        assert_eq!(
            reopened.state("legacy-co").expect("state").status,
            ClientStatus::Deployed
        );
    }
}
