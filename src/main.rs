// src/main.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use rand::thread_rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use asset_admin::config::AppState;
use asset_admin::models::settings::{AssetTagSettings, NotificationSettings};
use asset_admin::screens::{self, SettingsPage, catalog, network, organization, rbac};
use asset_admin::services::label_service::{Label, SheetLayout, render_qr_text, tag_sequence};
use asset_admin::services::notification::{Notifier, Severity};
use asset_admin::services::rbac_service::CrudAction;
use asset_admin::services::settings_service::SettingsEditor;
use asset_admin::services::{DeleteOutcome, SubmitOutcome};

#[derive(Parser)]
#[command(name = "asset-admin", version, about = "Stammdaten und Einstellungen der Inventarverwaltung")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Guarda o token de acesso na sessão
    Login {
        #[arg(long, env = "ASSET_ADMIN_TOKEN")]
        token: String,
    },
    /// Apaga a sessão
    Logout,
    /// Lista as páginas de configurações
    Pages,
    /// Mostra a tabela de uma página
    List {
        page: SettingsPage,
        /// Coluna para ordenar (repita para inverter)
        #[arg(long)]
        sort: Vec<String>,
    },
    /// Mostra um registro em modo de visualização
    Show { page: SettingsPage, id: i64 },
    /// Cria um registro; campos como "chave=valor" (chaves do formulário)
    Create {
        page: SettingsPage,
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    /// Altera campos de um registro existente
    Edit {
        page: SettingsPage,
        id: i64,
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },
    /// Exclui um registro após confirmação
    Delete {
        page: SettingsPage,
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Alterna permissões de um cargo ("modulo:acao") e grava
    Grant {
        role_id: i64,
        #[arg(required = true)]
        cells: Vec<String>,
    },
    /// Altera a numeração das etiquetas
    SetAssetTags {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        digits: Option<u32>,
        #[arg(long)]
        next: Option<u64>,
    },
    /// Altera as notificações por e-mail
    SetNotifications {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        sender: Option<String>,
        /// Substitui a lista de destinatários (repita a opção)
        #[arg(long = "recipient")]
        recipients: Vec<String>,
        #[arg(long)]
        warranty_days: Option<u32>,
    },
    /// Gera números de patrimônio
    Tags {
        #[command(flatten)]
        range: TagRange,
    },
    /// Gera a folha de etiquetas em PDF
    Labels {
        #[command(flatten)]
        range: TagRange,
        #[arg(long, default_value_t = 3)]
        columns: usize,
        #[arg(long, default_value_t = 8)]
        rows: usize,
        #[arg(long)]
        out: PathBuf,
        /// Mostra o QR Code da primeira etiqueta no terminal
        #[arg(long)]
        preview: bool,
    },
}

#[derive(clap::Args)]
struct TagRange {
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long)]
    digits: Option<u32>,
    #[arg(long)]
    start: Option<u64>,
    #[arg(long, default_value_t = 10)]
    count: usize,
}

impl TagRange {
    /// Valores omitidos vêm da configuração de etiquetas do servidor.
    async fn tags(&self, state: &AppState) -> anyhow::Result<Vec<String>> {
        let settings = if self.prefix.is_some() && self.digits.is_some() && self.start.is_some() {
            AssetTagSettings::default()
        } else {
            state
                .settings_service
                .get::<AssetTagSettings>()
                .await
                .context("Falha ao ler a configuração de etiquetas")?
        };

        let prefix = self.prefix.clone().unwrap_or(settings.prefix);
        let digits = self.digits.unwrap_or(settings.digit_count) as usize;
        let start = self.start.unwrap_or(settings.next_number);
        Ok(tag_sequence(&prefix, digits, start, self.count))
    }
}

// Abre a tela tipada da página, com as listas auxiliares quando houver.
macro_rules! with_screen {
    ($page:expr, $state:expr, |$screen:ident| $body:block) => {{
        let client = &$state.api_client;
        let locale = &$state.locale;
        match $page {
            SettingsPage::Categories => {
                let mut $screen = screens::open_screen(catalog::categories(), client, locale).await;
                $body
            }
            SettingsPage::Manufacturers => {
                let mut $screen = screens::open_screen(catalog::manufacturers(), client, locale).await;
                $body
            }
            SettingsPage::Suppliers => {
                let mut $screen = screens::open_screen(catalog::suppliers(), client, locale).await;
                $body
            }
            SettingsPage::DeviceModels => {
                let (mut $screen, _) = catalog::open_device_models(client, locale).await;
                $body
            }
            SettingsPage::Departments => {
                let mut $screen = screens::open_screen(organization::departments(), client, locale).await;
                $body
            }
            SettingsPage::UserGroups => {
                let mut $screen = screens::open_screen(organization::user_groups(), client, locale).await;
                $body
            }
            SettingsPage::Locations => {
                let mut $screen = screens::open_screen(organization::locations(), client, locale).await;
                $body
            }
            SettingsPage::Rooms => {
                let (mut $screen, _) = organization::open_rooms(client, locale).await;
                $body
            }
            SettingsPage::NetworkPorts => {
                let (mut $screen, _) = network::open_network_ports(client, locale).await;
                $body
            }
            SettingsPage::Switches => {
                let (mut $screen, _) = network::open_switches(client, locale).await;
                $body
            }
            SettingsPage::Roles => {
                let mut $screen = screens::open_screen(rbac::roles(), client, locale).await;
                $body
            }
            other => Err(anyhow!("A página '{}' não tem lista de registros", other)),
        }
    }};
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("Formato esperado 'chave=valor': {raw}"))
}

fn print_toasts(notifier: &Notifier) {
    for toast in notifier.history() {
        match toast.severity {
            Severity::Error => eprintln!("✗ {}", toast.message),
            Severity::Success => println!("✓ {}", toast.message),
            Severity::Info => println!("{}", toast.message),
        }
    }
}

fn report_submit(
    outcome: SubmitOutcome,
    field_errors: Option<&BTreeMap<String, String>>,
    notifier: &Notifier,
) -> anyhow::Result<()> {
    for (field, message) in field_errors.into_iter().flatten() {
        eprintln!("{field}: {message}");
    }
    print_toasts(notifier);
    match outcome {
        SubmitOutcome::Saved => Ok(()),
        _ => Err(anyhow!("Änderungen wurden nicht gespeichert")),
    }
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
    println!("{prompt} [j/N]");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "j" | "ja" | "y" | "yes"))
}

async fn show_singleton(page: SettingsPage, state: &AppState) -> anyhow::Result<()> {
    let value = match page {
        SettingsPage::AssetTags => {
            serde_json::to_value(state.settings_service.get::<AssetTagSettings>().await?)?
        }
        SettingsPage::Notifications => {
            serde_json::to_value(state.settings_service.get::<NotificationSettings>().await?)?
        }
        other => bail!("A página '{}' não tem configurações", other),
    };
    println!("{}", page.title());
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn run(command: Command, state: AppState) -> anyhow::Result<()> {
    match command {
        Command::Login { token } => {
            state.session.set_token(token).await?;
            println!("Sitzung gespeichert ({})", state.config.session_file.display());
            Ok(())
        }

        Command::Logout => {
            state.session.clear().await?;
            println!("Sitzung beendet");
            Ok(())
        }

        Command::Pages => {
            for page in SettingsPage::ALL {
                println!("{:<15} {:<32} {}", page.slug(), page.path(), page.title());
            }
            Ok(())
        }

        Command::List { page, sort } => {
            if !page.is_list() {
                return show_singleton(page, &state).await;
            }
            with_screen!(page, state, |screen| {
                for key in &sort {
                    if !screen.sort_by(key) {
                        eprintln!("Spalte '{key}' ist nicht sortierbar");
                    }
                }
                println!("{}", screen.title());
                println!("{}", screen.table().to_text());
                print_toasts(screen.notifier());
                Ok(())
            })
        }

        Command::Show { page, id } => {
            with_screen!(page, state, |screen| {
                screen.open_view(id)?;
                for field in screen.dialog_fields() {
                    println!("{:<16} {}", field.label, field.value);
                }
                Ok(())
            })?;

            if page == SettingsPage::Roles {
                let mut manager = rbac::open_role_manager(&state.api_client).await;
                manager.select_role(id).await?;
                if let Some(matrix) = manager.matrix() {
                    println!();
                    println!("{}", rbac::matrix_text(matrix));
                }
                print_toasts(manager.notifier());
            }
            Ok(())
        }

        Command::Create { page, set } => {
            with_screen!(page, state, |screen| {
                screen.open_create();
                for (key, value) in &set {
                    screen.set_field(key, value)?;
                }
                let outcome = screen.submit().await?;
                report_submit(outcome, screen.dialog().map(|d| d.field_errors()), screen.notifier())
            })
        }

        Command::Edit { page, id, set } => {
            with_screen!(page, state, |screen| {
                screen.open_edit(id)?;
                for (key, value) in &set {
                    screen.set_field(key, value)?;
                }
                let outcome = screen.submit().await?;
                report_submit(outcome, screen.dialog().map(|d| d.field_errors()), screen.notifier())
            })
        }

        Command::Delete { page, id, yes } => {
            with_screen!(page, state, |screen| {
                let prompt = screen.request_delete(id)?.message.clone();
                if yes || confirm(&prompt).await? {
                    if let DeleteOutcome::Rejected(err) = screen.confirm_delete().await? {
                        tracing::debug!(kind = ?err.kind, "Exclusão rejeitada");
                    }
                } else {
                    screen.cancel_delete();
                    println!("Abgebrochen");
                }
                print_toasts(screen.notifier());
                Ok(())
            })
        }

        Command::Grant { role_id, cells } => {
            let mut manager = rbac::open_role_manager(&state.api_client).await;
            manager.select_role(role_id).await?;

            for cell in &cells {
                let (module, action) = cell
                    .split_once(':')
                    .ok_or_else(|| anyhow!("Formato esperado 'modulo:acao': {cell}"))?;
                let action = CrudAction::classify(action)
                    .ok_or_else(|| anyhow!("Ação desconhecida: {action}"))?;
                if manager.toggle(module, action).is_none() {
                    bail!("Permissão inexistente: {cell}");
                }
            }

            let outcome = manager.save().await?;
            if let Some(matrix) = manager.matrix() {
                println!("{}", rbac::matrix_text(matrix));
            }
            print_toasts(manager.notifier());
            match outcome {
                SubmitOutcome::Saved => Ok(()),
                _ => Err(anyhow!("Berechtigungen wurden nicht gespeichert")),
            }
        }

        Command::SetAssetTags { prefix, digits, next } => {
            let mut editor = SettingsEditor::<AssetTagSettings>::new(state.settings_service.clone(), state.locale.clone());
            editor.load().await;
            let form = editor.form_mut();
            if let Some(prefix) = prefix {
                form.prefix = prefix;
            }
            if let Some(digits) = digits {
                form.digit_count = digits;
            }
            if let Some(next) = next {
                form.next_number = next;
            }

            let outcome = editor.save().await;
            report_submit(outcome, Some(editor.field_errors()), editor.notifier())
        }

        Command::SetNotifications { enabled, sender, recipients, warranty_days } => {
            let mut editor =
                SettingsEditor::<NotificationSettings>::new(state.settings_service.clone(), state.locale.clone());
            editor.load().await;
            let form = editor.form_mut();
            if let Some(enabled) = enabled {
                form.enabled = enabled;
            }
            if let Some(sender) = sender {
                form.sender_email = sender;
            }
            if !recipients.is_empty() {
                form.recipients = recipients;
            }
            if let Some(days) = warranty_days {
                form.warranty_reminder_days = days;
            }

            let outcome = editor.save().await;
            report_submit(outcome, Some(editor.field_errors()), editor.notifier())
        }

        Command::Tags { range } => {
            for tag in range.tags(&state).await? {
                println!("{tag}");
            }
            Ok(())
        }

        Command::Labels { range, columns, rows, out, preview } => {
            let tags = range.tags(&state).await?;
            if tags.is_empty() {
                bail!("Keine Etiketten zu drucken");
            }
            if preview {
                println!("{}", render_qr_text(&tags[0])?);
            }

            let labels: Vec<Label> = {
                let mut rng = thread_rng();
                tags.into_iter().map(|t| Label::new(t, &mut rng)).collect()
            };
            let count = labels.len();

            let printer = state.label_printer(SheetLayout { columns, rows_per_page: rows });
            let pdf = printer.render_pdf(labels)?;
            tokio::fs::write(&out, pdf)
                .await
                .with_context(|| format!("Falha ao gravar {}", out.display()))?;
            println!("{count} Etiketten -> {}", out.display());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log vai para stderr; stdout fica com a saída dos comandos.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let state = AppState::new().await?;

    run(cli.command, state).await
}
