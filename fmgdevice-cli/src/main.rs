use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;

use fmgdevice_core::differ::{create_plan, destroy_plan};
use fmgdevice_core::effect::Effect;
use fmgdevice_core::interpreter::{EffectOutcome, Interpreter, InterpreterConfig};
use fmgdevice_core::plan::Plan;
use fmgdevice_core::provider::Provider;
use fmgdevice_core::resource::{Resource, ResourceId, State, Value};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use fmgdevice_provider::{FmgdeviceProvider, ProviderConfig, schemas};

#[derive(Parser)]
#[command(name = "fmgdevice")]
#[command(about = "Manage FortiManager device configuration objects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Validate {
        /// Path to configuration document
        #[arg(default_value = "main.json")]
        file: PathBuf,
    },
    /// Show execution plan without applying changes
    Plan {
        /// Path to configuration document
        #[arg(default_value = "main.json")]
        file: PathBuf,
    },
    /// Apply changes to reach the desired state
    Apply {
        /// Path to configuration document
        #[arg(default_value = "main.json")]
        file: PathBuf,

        /// Show what would be done without calling FortiManager
        #[arg(long)]
        dry_run: bool,

        /// Keep applying after a failed change
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Destroy all resources defined in the configuration file
    Destroy {
        /// Path to configuration document
        #[arg(default_value = "main.json")]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Read an existing object and print it as a resource declaration
    Import {
        /// Resource type (e.g., system_zone)
        resource_type: String,

        /// Object key (e.g., dmz, 5)
        id: String,

        /// Scoping parameter as key=value (e.g., device_name=fgt-01)
        #[arg(long = "import-option", value_name = "KEY=VALUE")]
        import_options: Vec<String>,

        /// Document whose provider block configures the connection
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List resource types, or show the attributes of one
    Schema {
        resource_type: Option<String>,
    },
}

/// Configuration document
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    provider: ProviderConfig,
    #[serde(default)]
    resources: Vec<ResourceDecl>,
}

#[derive(Debug, Deserialize)]
struct ResourceDecl {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file } => run_validate(&file),
        Commands::Plan { file } => run_plan(&file).await,
        Commands::Apply {
            file,
            dry_run,
            continue_on_error,
        } => run_apply(&file, dry_run, continue_on_error).await,
        Commands::Destroy { file, auto_approve } => run_destroy(&file, auto_approve).await,
        Commands::Import {
            resource_type,
            id,
            import_options,
            config,
        } => run_import(&resource_type, &id, import_options, config.as_deref()).await,
        Commands::Schema { resource_type } => run_schema(resource_type.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn get_schemas() -> HashMap<String, ResourceSchema> {
    let mut all_schemas = HashMap::new();
    for schema in schemas::all_schemas() {
        all_schemas.insert(schema.resource_type.clone(), schema);
    }
    all_schemas
}

/// Parse a configuration document into provider settings and resources
fn load_document(file: &Path) -> Result<(ProviderConfig, Vec<Resource>), String> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    parse_document(&content)
}

fn parse_document(content: &str) -> Result<(ProviderConfig, Vec<Resource>), String> {
    let document: Document =
        serde_json::from_str(content).map_err(|e| format!("Parse error: {}", e))?;
    let schemas = get_schemas();

    let mut resources = Vec::with_capacity(document.resources.len());
    for decl in document.resources {
        let schema = schemas
            .get(&decl.resource_type)
            .ok_or_else(|| format!("Unknown resource type: {}", decl.resource_type))?;

        let mut attributes = BTreeMap::new();
        for (key, json) in &decl.attributes {
            let value = Value::from_json(json).ok_or_else(|| {
                format!(
                    "{}.{}: unsupported value for '{}': {}",
                    decl.resource_type, decl.name, key, json
                )
            })?;
            attributes.insert(key.clone(), value);
        }

        let mut resource = Resource::new(decl.resource_type, decl.name);
        resource.attributes = schema.conform(attributes);
        resources.push(resource);
    }

    Ok((document.provider, resources))
}

fn validate_resources(resources: &[Resource]) -> Result<(), String> {
    let schemas = get_schemas();
    let mut all_errors = Vec::new();

    for resource in resources {
        if let Some(schema) = schemas.get(&resource.id.resource_type)
            && let Err(errors) = schema.validate(&resource.attributes)
        {
            for error in errors {
                all_errors.push(format!("{}: {}", resource.id, error));
            }
        }
    }

    let mut seen = HashSet::new();
    for resource in resources {
        if !seen.insert(&resource.id) {
            all_errors.push(format!("{}: declared more than once", resource.id));
        }
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors.join("\n"))
    }
}

fn get_provider(config: ProviderConfig) -> Result<FmgdeviceProvider, String> {
    FmgdeviceProvider::connect(config.from_process_env()).map_err(|e| e.to_string())
}

/// Log out of FortiManager, warning on failure
async fn close_provider(provider: &FmgdeviceProvider) {
    if let Err(e) = provider.close().await {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
}

/// Read the current state of every declared resource
async fn read_states(
    provider: &FmgdeviceProvider,
    resources: &[Resource],
) -> Result<HashMap<ResourceId, State>, String> {
    let mut current_states = HashMap::new();
    for resource in resources {
        let identifier = provider.identifier(resource);
        let state = provider
            .read(resource, identifier.as_deref())
            .await
            .map_err(|e| format!("Failed to read state: {}", e))?;
        current_states.insert(resource.id.clone(), state);
    }
    Ok(current_states)
}

fn run_validate(file: &Path) -> Result<(), String> {
    let (_, resources) = load_document(file)?;

    println!("{}", "Validating...".cyan());

    validate_resources(&resources)?;

    println!(
        "{}",
        format!("✓ {} resources validated successfully.", resources.len())
            .green()
            .bold()
    );

    for resource in &resources {
        println!("  • {}", resource.id);
    }

    Ok(())
}

async fn run_plan(file: &Path) -> Result<(), String> {
    let (config, resources) = load_document(file)?;
    validate_resources(&resources)?;

    let provider = get_provider(config)?;
    let result = plan_resources(&provider, &resources).await;
    close_provider(&provider).await;
    result
}

async fn plan_resources(provider: &FmgdeviceProvider, resources: &[Resource]) -> Result<(), String> {
    let current_states = read_states(provider, resources).await?;
    let plan = create_plan(resources, &current_states, &get_schemas());
    print_plan(&plan);
    Ok(())
}

async fn run_apply(file: &Path, dry_run: bool, continue_on_error: bool) -> Result<(), String> {
    let (config, resources) = load_document(file)?;
    validate_resources(&resources)?;

    let interpreter = Interpreter::new(get_provider(config)?).with_config(InterpreterConfig {
        dry_run: false,
        continue_on_error,
    });
    let result = apply_resources(&interpreter, &resources, dry_run).await;
    close_provider(interpreter.provider()).await;
    result
}

async fn apply_resources(
    interpreter: &Interpreter<FmgdeviceProvider>,
    resources: &[Resource],
    dry_run: bool,
) -> Result<(), String> {
    let current_states = read_states(interpreter.provider(), resources).await?;
    let plan = create_plan(resources, &current_states, &get_schemas());

    if plan.is_empty() {
        println!("{}", "No changes needed.".green());
        return Ok(());
    }

    print_plan(&plan);
    println!();

    if dry_run {
        println!("{}", "Dry run: no changes applied.".yellow());
        return Ok(());
    }

    println!("{}", "Applying changes...".cyan().bold());
    println!();

    let result = interpreter.apply(&plan).await;

    for (effect, outcome) in plan.effects().iter().zip(&result.outcomes) {
        match outcome {
            Ok(EffectOutcome::Skipped { reason }) => {
                println!("  {} {} ({})", "-".yellow(), format_effect(effect), reason)
            }
            Ok(_) => println!("  {} {}", "✓".green(), format_effect(effect)),
            Err(e) => println!("  {} {} - {}", "✗".red(), format_effect(effect), e),
        }
    }

    println!();
    if result.is_success() {
        println!(
            "{}",
            format!("Apply complete! {} changes applied.", result.success_count)
                .green()
                .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Apply failed. {} succeeded, {} failed.",
            result.success_count, result.failure_count
        ))
    }
}

async fn run_destroy(file: &Path, auto_approve: bool) -> Result<(), String> {
    let (config, resources) = load_document(file)?;

    if resources.is_empty() {
        println!("{}", "No resources defined in configuration.".yellow());
        return Ok(());
    }

    let interpreter = Interpreter::new(get_provider(config)?).with_config(InterpreterConfig {
        dry_run: false,
        continue_on_error: true,
    });
    let result = destroy_resources(&interpreter, &resources, auto_approve).await;
    close_provider(interpreter.provider()).await;
    result
}

async fn destroy_resources(
    interpreter: &Interpreter<FmgdeviceProvider>,
    resources: &[Resource],
    auto_approve: bool,
) -> Result<(), String> {
    let current_states = read_states(interpreter.provider(), resources).await?;
    let plan = destroy_plan(resources, &current_states);

    if plan.is_empty() {
        println!("{}", "No resources to destroy.".green());
        return Ok(());
    }

    // Display destroy plan
    println!("{}", "Destroy Plan:".red().bold());
    println!();

    for effect in plan.effects() {
        println!("  {} {}", "-".red().bold(), effect.resource_id());
    }

    println!();
    println!(
        "Plan: {} to destroy.",
        plan.effects().len().to_string().red()
    );
    println!();

    // Confirmation prompt
    if !auto_approve {
        println!(
            "{}",
            "Do you really want to destroy all resources?"
                .yellow()
                .bold()
        );
        println!(
            "  {}",
            "This action cannot be undone. Type 'yes' to confirm.".yellow()
        );
        print!("\n  Enter a value: ");
        std::io::Write::flush(&mut std::io::stdout()).map_err(|e| e.to_string())?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .map_err(|e| e.to_string())?;

        if input.trim() != "yes" {
            println!();
            println!("{}", "Destroy cancelled.".yellow());
            return Ok(());
        }
        println!();
    }

    println!("{}", "Destroying resources...".red().bold());
    println!();

    let result = interpreter.apply(&plan).await;

    for (effect, outcome) in plan.effects().iter().zip(&result.outcomes) {
        match outcome {
            Ok(_) => println!("  {} {}", "✓".green(), format_effect(effect)),
            Err(e) => println!("  {} {} - {}", "✗".red(), format_effect(effect), e),
        }
    }

    println!();
    if result.is_success() {
        println!(
            "{}",
            format!(
                "Destroy complete! {} resources destroyed.",
                result.success_count
            )
            .green()
            .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Destroy failed. {} succeeded, {} failed.",
            result.success_count, result.failure_count
        ))
    }
}

async fn run_import(
    resource_type: &str,
    id: &str,
    import_options: Vec<String>,
    config_file: Option<&Path>,
) -> Result<(), String> {
    if !get_schemas().contains_key(resource_type) {
        return Err(format!("Unknown resource type: {}", resource_type));
    }

    let mut config = match config_file {
        Some(file) => load_document(file)?.0,
        None => ProviderConfig::default(),
    };
    config.import_options.extend(import_options);

    let provider = get_provider(config)?;
    let result = provider.import(resource_type, id).await;
    close_provider(&provider).await;
    let state = result.map_err(|e| e.to_string())?;

    if !state.exists {
        return Err(format!("{} {} not found", resource_type, id));
    }

    println!("{}", import_declaration(&state));
    Ok(())
}

/// Render an imported state as a resource entry for a configuration document
fn import_declaration(state: &State) -> String {
    let attributes: serde_json::Map<String, serde_json::Value> = state
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    let decl = serde_json::json!({
        "type": state.id.resource_type,
        "name": state.id.name,
        "attributes": attributes,
    });
    serde_json::to_string_pretty(&decl).unwrap_or_else(|_| decl.to_string())
}

fn run_schema(resource_type: Option<&str>) -> Result<(), String> {
    let schemas = get_schemas();

    let Some(resource_type) = resource_type else {
        let mut names: Vec<&String> = schemas.keys().collect();
        names.sort();
        for name in names {
            let description = schemas[name].description.as_deref().unwrap_or("");
            println!("{}  {}", name.bold(), description.dimmed());
        }
        return Ok(());
    };

    let schema = schemas
        .get(resource_type)
        .ok_or_else(|| format!("Unknown resource type: {}", resource_type))?;

    println!("{}", schema.resource_type.cyan().bold());
    if let Some(description) = &schema.description {
        println!("{}", description);
    }
    println!();
    for attr in schema.attributes.values() {
        print_attribute(attr, 1);
    }
    Ok(())
}

fn print_attribute(attr: &AttributeSchema, depth: usize) {
    let mut flags = Vec::new();
    if attr.required {
        flags.push("required");
    }
    if attr.computed {
        flags.push("computed");
    }
    if attr.force_new {
        flags.push("force-new");
    }
    if attr.parameter {
        flags.push("parameter");
    }

    let indent = "  ".repeat(depth);
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    println!(
        "{}{}: {}{}",
        indent,
        attr.name.bold(),
        attr.attr_type,
        flags.yellow()
    );
    if let Some(description) = &attr.description {
        println!("{}  {}", indent, description.dimmed());
    }

    if let AttributeType::Table(columns) = attr.attr_type.base() {
        for column in columns {
            print_attribute(column, depth + 1);
        }
    }
}

fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        println!("{}", "No changes. Configuration is up-to-date.".green());
        return;
    }

    let schemas = get_schemas();

    println!("{}", "Execution Plan:".cyan().bold());
    println!();

    for effect in plan.effects() {
        match effect {
            Effect::Create(r) => {
                println!("  {} {}", "+".green().bold(), r.id);
                for (key, value) in &r.attributes {
                    println!("      {}: {}", key, format_value(value));
                }
            }
            Effect::Update { id, from, to, .. } | Effect::Replace { id, from, to, .. } => {
                let (marker, suffix) = match effect {
                    Effect::Replace { .. } => ("-/+".magenta().bold(), " (must be replaced)"),
                    _ => ("~".yellow().bold(), ""),
                };
                println!("  {} {}{}", marker, id, suffix.magenta());
                let schema = schemas.get(&id.resource_type);
                for (key, value) in &to.attributes {
                    let attr = schema.and_then(|s| s.get(key));
                    if attr.is_some_and(|a| a.parameter || a.computed) {
                        continue;
                    }
                    let unchanged = match (from.attributes.get(key), attr) {
                        (Some(current), Some(attr)) => attr.values_equal(value, current),
                        (Some(current), None) => current == value,
                        (None, _) => false,
                    };
                    if unchanged {
                        continue;
                    }
                    let old = from
                        .attributes
                        .get(key)
                        .map(format_value)
                        .unwrap_or_else(|| "(none)".to_string());
                    println!(
                        "      {}: {} → {}",
                        key,
                        old.red(),
                        format_value(value).green()
                    );
                }
            }
            Effect::Delete { resource, .. } => {
                println!("  {} {}", "-".red().bold(), resource.id);
            }
            Effect::Read(r) => println!("  {} {}", "<=".cyan(), r.id),
        }
    }

    println!();
    println!("{}", plan.summary());
}

fn format_effect(effect: &Effect) -> String {
    match effect {
        Effect::Create(r) => format!("Create {}", r.id),
        Effect::Update { id, .. } => format!("Update {}", id),
        Effect::Replace { id, .. } => format!("Replace {}", id),
        Effect::Delete { resource, .. } => format!("Delete {}", resource.id),
        Effect::Read(r) => format!("Read {}", r.id),
    }
}

fn format_value(value: &Value) -> String {
    value.to_json().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ZONE_DOC: &str = r#"{
        "provider": {"hostname": "fmg.example.com", "adom": "branch"},
        "resources": [
            {
                "type": "system_zone",
                "name": "dmz",
                "attributes": {
                    "device_name": "fgt-01",
                    "device_vdom": "root",
                    "name": "dmz",
                    "interface": ["port1", "port2"],
                    "intrazone": "deny",
                    "tagging": []
                }
            },
            {
                "type": "firewall_ipmacbinding_table",
                "name": "pc1",
                "attributes": {
                    "device_name": "fgt-01",
                    "device_vdom": "root",
                    "seq_num": 5,
                    "ip": "10.0.0.5",
                    "mac": "00:0c:29:aa:bb:cc"
                }
            }
        ]
    }"#;

    fn write_doc(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_document_from_file() {
        let file = write_doc(ZONE_DOC);
        let (config, resources) = load_document(file.path()).unwrap();

        assert_eq!(config.hostname.as_deref(), Some("fmg.example.com"));
        assert_eq!(config.adom.as_deref(), Some("branch"));
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id, ResourceId::new("system_zone", "dmz"));
        assert_eq!(
            resources[0].attributes["interface"],
            Value::string_list(["port1", "port2"])
        );
        assert_eq!(resources[0].attributes["tagging"], Value::Table(vec![]));
        assert_eq!(resources[1].attributes["seq_num"], Value::Int(5));
        assert!(validate_resources(&resources).is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }

    #[test]
    fn unknown_resource_type_is_rejected() {
        let err = parse_document(r#"{"resources": [{"type": "ec2_vpc", "name": "main"}]}"#)
            .unwrap_err();
        assert_eq!(err, "Unknown resource type: ec2_vpc");
    }

    #[test]
    fn unsupported_value_is_rejected() {
        let err = parse_document(
            r#"{"resources": [{"type": "system_zone", "name": "dmz", "attributes": {"name": null}}]}"#,
        )
        .unwrap_err();
        assert!(err.contains("unsupported value for 'name'"));
    }

    #[test]
    fn validation_reports_every_error() {
        let (_, resources) = parse_document(
            r#"{"resources": [
                {"type": "system_zone", "name": "a", "attributes": {"intrazone": "maybe"}},
                {"type": "firewall_ipmacbinding_table", "name": "b", "attributes": {"mac": "nope"}},
                {"type": "firewall_ipmacbinding_table", "name": "b"}
            ]}"#,
        )
        .unwrap();

        let err = validate_resources(&resources).unwrap_err();
        assert!(err.contains("system_zone.a: Required attribute 'name' is missing"));
        assert!(err.contains("system_zone.a: Invalid enum variant 'maybe'"));
        assert!(err.contains("firewall_ipmacbinding_table.b: Validation failed"));
        assert!(err.contains("firewall_ipmacbinding_table.b: declared more than once"));
    }

    #[test]
    fn import_declaration_round_trips_through_parser() {
        let state = State::existing(
            ResourceId::new("system_zone", "dmz"),
            BTreeMap::from([
                ("name".to_string(), Value::string("dmz")),
                ("interface".to_string(), Value::string_list(["port1"])),
            ]),
        )
        .with_identifier("dmz");

        let doc = format!(r#"{{"resources": [{}]}}"#, import_declaration(&state));
        let (_, resources) = parse_document(&doc).unwrap();
        assert_eq!(resources[0].attributes, state.attributes);
    }

    #[test]
    fn cli_parses_apply_flags() {
        let cli = Cli::try_parse_from(["fmgdevice", "apply", "site.json", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Apply {
                file,
                dry_run,
                continue_on_error,
            } => {
                assert_eq!(file, PathBuf::from("site.json"));
                assert!(dry_run);
                assert!(!continue_on_error);
            }
            _ => panic!("Expected apply"),
        }
    }

    #[test]
    fn cli_parses_import_options() {
        let cli = Cli::try_parse_from([
            "fmgdevice",
            "import",
            "system_zone",
            "dmz",
            "--import-option",
            "device_name=fgt-01",
            "--import-option",
            "device_vdom=root",
        ])
        .unwrap();
        match cli.command {
            Commands::Import {
                resource_type,
                id,
                import_options,
                config,
            } => {
                assert_eq!(resource_type, "system_zone");
                assert_eq!(id, "dmz");
                assert_eq!(import_options.len(), 2);
                assert!(config.is_none());
            }
            _ => panic!("Expected import"),
        }
    }

    #[test]
    fn boolean_options_follow_declared_spelling() {
        let (_, resources) = parse_document(
            r#"{"resources": [{
                "type": "system_zone",
                "name": "dmz",
                "attributes": {"name": "dmz", "dynamic_sort_subtable": true, "intrazone": "deny"}
            }]}"#,
        )
        .unwrap();

        assert_eq!(
            resources[0].attributes["dynamic_sort_subtable"],
            Value::string("true")
        );
        assert!(validate_resources(&resources).is_ok());
    }

    #[test]
    fn values_render_as_json() {
        assert_eq!(format_value(&Value::Int(3)), "3");
        assert_eq!(format_value(&Value::string_list(["port1"])), r#"["port1"]"#);
    }
}
