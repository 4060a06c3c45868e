//! `blackwell templates` - list, show, apply.

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ApplyArgs, TemplateCommands};
use crate::commands::client::{self, ClientSpec};
use crate::context::AppContext;
use crate::output::emit;
use crate::templates;

pub fn handle(
    action: &TemplateCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TemplateCommands::List => emit(&templates::TEMPLATES, flags.format),
        TemplateCommands::Show { name } => {
            let template = lookup(name)?;
            emit(template, flags.format)
        }
        TemplateCommands::Apply(args) => apply(args, ctx, flags),
    }
}

fn lookup(name: &str) -> anyhow::Result<&'static templates::StackTemplate> {
    templates::find(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown template '{name}' (available: {})",
            templates::names().join(", ")
        )
    })
}

fn apply(args: &ApplyArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let template = lookup(&args.name)?;
    client::create_client(
        ClientSpec {
            client_id: args.client_id.clone(),
            company: args.company.clone(),
            domain: args.domain.clone(),
            email: args.email.clone(),
            cms: template.cms_provider.to_string(),
            ecommerce: template.ecommerce_provider.map(str::to_string),
            ssg: template.ssg_engine.to_string(),
            mode: template.integration_mode,
            tier: None,
            region: None,
            notes: format!("created from template {}", template.name),
        },
        ctx,
        flags,
    )
}
