use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidChangeWatchedFilesParams,
    DidChangeWatchedFilesRegistrationOptions, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, FileChangeType, FileSystemWatcher,
    GlobPattern, GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MessageType,
    OneOf, Registration, ServerCapabilities, ServerInfo, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextDocumentSyncOptions, TextDocumentSyncSaveOptions,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use super::convert::{
    from_lsp_position, key_to_uri, to_lsp_diagnostic, to_lsp_hover, to_lsp_location, uri_to_key,
};
use super::session::{FileChange, Session};
use super::types::{PROJECTS_UPDATED, ProjectsUpdatedParams, TRANSLATIONS_LOADED};
use crate::core::PublishDiagnostics;

const TRANSLATION_WATCH_GLOB: &str = "**/*.{xlf,xliff,json}";

pub struct Backend {
    client: Client,
    /// Single writer for all engine state. Diagnostics are published while
    /// the lock is held so the client sees them in event order.
    session: Mutex<Session>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            session: Mutex::new(Session::default()),
        }
    }

    async fn publish(&self, sets: Vec<PublishDiagnostics>) {
        for set in sets {
            let Some(uri) = key_to_uri(&set.uri) else {
                warn!("cannot publish diagnostics for {}", set.uri);
                continue;
            };
            let diagnostics = set.diagnostics.iter().map(to_lsp_diagnostic).collect();
            self.client.publish_diagnostics(uri, diagnostics, None).await;
        }
    }

    async fn register_file_watcher(&self) {
        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String(TRANSLATION_WATCH_GLOB.to_string()),
                kind: None,
            }],
        };
        let register_options = match serde_json::to_value(options) {
            Ok(value) => value,
            Err(e) => {
                warn!("cannot encode watcher options: {}", e);
                return;
            }
        };
        let registration = Registration {
            id: "i18n-lens/translation-files".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };
        if let Err(e) = self.client.register_capability(vec![registration]).await {
            debug!("client refused file watcher registration: {}", e);
        }
    }

    async fn projects_updated(&self, params: ProjectsUpdatedParams) {
        info!("{} received", PROJECTS_UPDATED);
        let mut session = self.session.lock().await;
        match session.projects_updated(params.projects) {
            Ok(published) => self.publish(published).await,
            Err(e) => {
                warn!("{:#}", e);
                self.client
                    .show_message(MessageType::ERROR, format!("i18n-lens: {:#}", e))
                    .await;
            }
        }
    }

    async fn translations_loaded(&self) {
        info!("{} received", TRANSLATIONS_LOADED);
        let mut session = self.session.lock().await;
        let published = session.translations_loaded();
        self.publish(published).await;
    }
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }
    params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        let root = workspace_root(&params);
        info!("i18n-lens language server initializing (root: {:?})", root);
        *self.session.lock().await = Session::new(root);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                        ..Default::default()
                    },
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "i18n-lens".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.register_file_watcher().await;

        let mut session = self.session.lock().await;
        match session.load_projects() {
            Ok(published) => self.publish(published).await,
            Err(e) => {
                warn!("failed to load config: {:#}", e);
                self.client
                    .show_message(MessageType::ERROR, format!("i18n-lens: {:#}", e))
                    .await;
            }
        }
        let published = session.load_translations();
        self.publish(published).await;

        info!("i18n-lens language server initialized");
        self.client
            .log_message(MessageType::INFO, "i18n-lens language server ready")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        info!("i18n-lens language server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("document opened: {}", params.text_document.uri);
        let document = params.text_document;
        let mut session = self.session.lock().await;
        let published = session.open(
            uri_to_key(&document.uri),
            document.language_id,
            document.text,
        );
        self.publish(published).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("document changed: {}", params.text_document.uri);
        // Full sync: the last change carries the whole text
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let mut session = self.session.lock().await;
        let published = session.change(uri_to_key(&params.text_document.uri), change.text);
        self.publish(published).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("document saved: {}", params.text_document.uri);
        let key = uri_to_key(&params.text_document.uri);
        let mut session = self.session.lock().await;
        let published = match params.text {
            Some(text) => session.change(key, text),
            None => session.watched_file_changed(&key, FileChange::Changed),
        };
        self.publish(published).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("document closed: {}", params.text_document.uri);
        let mut session = self.session.lock().await;
        let published = session.close(&uri_to_key(&params.text_document.uri));
        self.publish(published).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let mut session = self.session.lock().await;
        for event in params.changes {
            let change = match event.typ {
                FileChangeType::CREATED => FileChange::Created,
                FileChangeType::DELETED => FileChange::Deleted,
                _ => FileChange::Changed,
            };
            debug!("watched file {:?}: {}", change, event.uri);
            let published = session.watched_file_changed(&uri_to_key(&event.uri), change);
            self.publish(published).await;
        }
    }

    async fn hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let position = params.text_document_position_params;
        let session = self.session.lock().await;
        Ok(session
            .hover(
                &uri_to_key(&position.text_document.uri),
                from_lsp_position(position.position),
            )
            .map(to_lsp_hover))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> LspResult<Option<GotoDefinitionResponse>> {
        let position = params.text_document_position_params;
        let session = self.session.lock().await;
        let locations: Vec<_> = session
            .locations(
                &uri_to_key(&position.text_document.uri),
                from_lsp_position(position.position),
            )
            .iter()
            .filter_map(to_lsp_location)
            .collect();

        if locations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(GotoDefinitionResponse::Array(locations)))
        }
    }
}

/// Serve the language server on stdio until the client disconnects.
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            info!(
                "starting i18n-lens language server v{}",
                env!("CARGO_PKG_VERSION")
            );
            let (service, socket) = LspService::build(Backend::new)
                .custom_method(PROJECTS_UPDATED, Backend::projects_updated)
                .custom_method(TRANSLATIONS_LOADED, Backend::translations_loaded)
                .finish();
            Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
                .serve(service)
                .await;
            Ok(())
        })
}
