use std::io::Write;

use anyhow::Context;
use vfs::VfsPath;

use vurif_config::ProjectConfig;
use vurif_core::{
    ComponentRegistry, LogLevel, Logger, Node, VurifError, normalize_path, vue_file_name_or_err,
};
use vurif_loader::GraphLoader;
use vurif_output::{
    ConsolePrinter, DotPrinter, JsonPrinter, OutputFormat, Printer, StatisticsReportPrinter,
};
use vurif_parser_sfc::SfcParser;
use vurif_server::{DEFAULT_PORT, VisualGraphPrinter};
use vurif_traversal::{WalkBuilder, discover_components};

pub const DEFAULT_OUT_DIR: &str = ".vurif";

/// Values given on the command line. Unset fields fall back to `vurif.toml`
/// and then to the built-in defaults.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub components_dir: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
    pub out_dir: Option<String>,
    pub port: Option<u16>,
    pub ignore: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub components_dir: String,
    pub format: OutputFormat,
    pub output: Option<String>,
    pub out_dir: String,
    pub port: u16,
    pub ignore: Vec<String>,
}

impl Settings {
    pub fn resolve(cli: Overrides, config: ProjectConfig) -> Result<Self, VurifError> {
        let components_dir = cli
            .components_dir
            .or(config.components_dir)
            .ok_or(VurifError::MissingComponentsDir)?;
        let format = cli.format.or(config.format).unwrap_or_default();
        // graph data always goes to `out_dir`
        let output = match format {
            OutputFormat::Graph => None,
            _ => cli
                .output
                .or_else(|| format.default_output().map(str::to_string)),
        };
        let mut ignore = config.ignore;
        ignore.extend(cli.ignore);
        Ok(Self {
            components_dir,
            format,
            output,
            out_dir: cli
                .out_dir
                .or(config.out_dir)
                .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string()),
            port: cli.port.or(config.port).unwrap_or(DEFAULT_PORT),
            ignore,
        })
    }
}

/// Roots of one run. A single file is printed alone while a directory of
/// views shares resolved components across its roots.
#[derive(Debug)]
pub enum Roots {
    File(Node),
    Dir(Vec<Node>),
}

#[derive(Debug)]
pub struct Analysis {
    pub registry: ComponentRegistry,
    pub roots: Roots,
}

impl Analysis {
    pub fn print(&self, printer: &dyn Printer, out: &mut dyn Write) -> anyhow::Result<()> {
        match &self.roots {
            Roots::File(node) => printer.print(node, out),
            Roots::Dir(nodes) => printer.print_all(nodes, out),
        }
    }
}

/// Register every component file under `components_dir` by file stem.
pub fn setup_registry(
    root: &VfsPath,
    components_dir: &str,
    ignore: &[String],
    logger: &dyn Logger,
) -> anyhow::Result<ComponentRegistry> {
    let walk = WalkBuilder::new(root)
        .dir(components_dir)
        .ignore_patterns(ignore)
        .build();
    let registry = ComponentRegistry::from_entries(discover_components(&walk, logger)?);
    logger.log(
        LogLevel::Debug,
        &format!(
            "registered {} components from {}",
            registry.len(),
            components_dir
        ),
    );
    Ok(registry)
}

/// Build the dependency graph of a single page file.
pub fn analyze_file(
    root: &VfsPath,
    page_file: &str,
    components_dir: &str,
    ignore: &[String],
    logger: &dyn Logger,
) -> anyhow::Result<Analysis> {
    let page = normalize_path(vue_file_name_or_err(page_file)?);
    if !root.join(page)?.is_file()? {
        return Err(VurifError::RootNotFound {
            path: page_file.to_string(),
        }
        .into());
    }
    let mut registry = setup_registry(root, components_dir, ignore, logger)?;
    // roots are looked up by their own path, which keeps same-named pages apart
    registry.set(page, page);

    let mut node = Node::new(page);
    GraphLoader::new(root, &registry, &SfcParser, logger).load(&mut node)?;
    Ok(Analysis {
        registry,
        roots: Roots::File(node),
    })
}

/// Build one dependency graph per component file found under `views_dir`.
pub fn analyze_dir(
    root: &VfsPath,
    views_dir: &str,
    components_dir: &str,
    ignore: &[String],
    logger: &dyn Logger,
) -> anyhow::Result<Analysis> {
    let mut registry = setup_registry(root, components_dir, ignore, logger)?;
    let views = WalkBuilder::new(root)
        .dir(views_dir)
        .ignore_patterns(ignore)
        .build()
        .collect_files(logger)?;
    logger.log(
        LogLevel::Debug,
        &format!("found {} views in {}", views.len(), views_dir),
    );
    registry.set_all(views.iter().map(|v| (v.clone(), v.clone())));

    let loader = GraphLoader::new(root, &registry, &SfcParser, logger);
    let mut nodes = Vec::with_capacity(views.len());
    for view in views {
        let mut node = Node::new(view);
        loader.load(&mut node)?;
        nodes.push(node);
    }
    Ok(Analysis {
        registry,
        roots: Roots::Dir(nodes),
    })
}

/// Printer for `format`. The visual graph writes its data below `out_dir`.
pub fn create_printer<'a>(
    format: OutputFormat,
    registry: &'a ComponentRegistry,
    out_dir: VfsPath,
) -> Box<dyn Printer + 'a> {
    match format {
        OutputFormat::Graph => Box::new(VisualGraphPrinter::new(registry, out_dir)),
        OutputFormat::Stdout => Box::new(ConsolePrinter::new(registry)),
        OutputFormat::Report => Box::new(StatisticsReportPrinter::new(registry)),
        OutputFormat::Json => Box::new(JsonPrinter::new(registry)),
        OutputFormat::Dot => Box::new(DotPrinter::new(registry)),
    }
}

/// Print `analysis` in the configured format. File formats are written to
/// `settings.output` below `root`; the others go to `stdout`.
pub fn emit(
    analysis: &Analysis,
    settings: &Settings,
    root: &VfsPath,
    stdout: &mut dyn Write,
    logger: &dyn Logger,
) -> anyhow::Result<()> {
    let out_dir = out_dir_path(root, settings)?;
    let printer = create_printer(settings.format, &analysis.registry, out_dir);
    match &settings.output {
        Some(output) => {
            let path = root.join(normalize_path(output))?;
            let mut file = path
                .create_file()
                .with_context(|| format!("failed to create {}", output))?;
            analysis.print(printer.as_ref(), &mut file)?;
            logger.log(
                LogLevel::Info,
                &format!("Saving {} file {}", settings.format, output),
            );
        }
        None => analysis.print(printer.as_ref(), stdout)?,
    }
    Ok(())
}

pub fn out_dir_path(root: &VfsPath, settings: &Settings) -> anyhow::Result<VfsPath> {
    Ok(root.join(normalize_path(&settings.out_dir))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vurif_core::test_util::TestFS;
    use vurif_core::{EmptyLogger, MemoryLogger};

    fn settings(format: OutputFormat) -> Settings {
        Settings::resolve(
            Overrides {
                components_dir: Some("components".into()),
                format: Some(format),
                ..Default::default()
            },
            ProjectConfig::default(),
        )
        .unwrap()
    }

    fn render(analysis: &Analysis, root: &VfsPath, format: OutputFormat) -> String {
        let mut out = Vec::new();
        emit(analysis, &settings(format), root, &mut out, &EmptyLogger).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn project() -> TestFS {
        TestFS::new([
            ("pages/index.vue", "<template><App/></template>"),
            ("pages/about.vue", "<template><div><App/><Message/></div></template>"),
            ("components/App.vue", "<template><Header/></template>"),
            ("components/Header.vue", "<template><header>title</header></template>"),
            ("components/atoms/Message.vue", "<template><p><slot/></p></template>"),
        ])
    }

    #[test]
    fn test_non_vue_input_is_rejected() {
        let fs = project();
        let err = analyze_file(&fs.root(), "pages/index.js", "components", &[], &EmptyLogger)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<VurifError>(),
            Some(&VurifError::InvalidInput {
                path: "pages/index.js".into()
            })
        );
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let fs = project();
        let err = analyze_file(&fs.root(), "pages/none.vue", "components", &[], &EmptyLogger)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VurifError>(),
            Some(VurifError::RootNotFound { .. })
        ));
    }

    #[test]
    fn test_load_tree_output() {
        let fs = project();
        let root = fs.root();
        let analysis =
            analyze_file(&root, "./pages/index.vue", "components", &[], &EmptyLogger).unwrap();

        assert_eq!(
            render(&analysis, &root, OutputFormat::Stdout),
            "pages/index.vue\n  └── components/App.vue\n    └── components/Header.vue\n"
        );
    }

    #[test]
    fn test_load_all_shares_components() {
        let fs = project();
        let root = fs.root();
        let analysis = analyze_dir(&root, "pages", "components", &[], &EmptyLogger).unwrap();
        let Roots::Dir(nodes) = &analysis.roots else {
            panic!("expected directory roots");
        };
        assert_eq!(nodes.len(), 2);

        let report = render(&analysis, &root, OutputFormat::Report);
        assert!(report.contains("|1  |components/App.vue            |         2|          1|"));
        assert!(report.contains("Total nodes: 5"));
        assert!(report.contains("Total edges: 4"));
    }

    #[test]
    fn test_json_is_written_to_output_file() {
        let fs = project();
        let root = fs.root();
        let analysis =
            analyze_file(&root, "pages/about.vue", "components", &[], &EmptyLogger).unwrap();
        let logger = MemoryLogger::new();
        let mut stdout = Vec::new();
        emit(
            &analysis,
            &settings(OutputFormat::Json),
            &root,
            &mut stdout,
            &logger,
        )
        .unwrap();

        assert!(stdout.is_empty());
        let json = root.join("vurif.json").unwrap().read_to_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 7);
        assert_eq!(
            logger.messages(LogLevel::Info),
            vec!["Saving json file vurif.json"]
        );
    }

    #[test]
    fn test_graph_writes_data_file() {
        let fs = project();
        let root = fs.root();
        let analysis =
            analyze_file(&root, "pages/index.vue", "components", &[], &EmptyLogger).unwrap();
        render(&analysis, &root, OutputFormat::Graph);

        let data = root
            .join(".vurif/data.json")
            .unwrap()
            .read_to_string()
            .unwrap();
        assert!(data.contains("\"id\":\"pages/index.vue-components/App.vue\""));
    }

    #[test]
    fn test_unresolved_children_are_skipped() {
        let fs = TestFS::new([
            ("pages/index.vue", "<template><div><Missing/><App/></div></template>"),
            ("components/App.vue", "<template><div/></template>"),
        ]);
        let root = fs.root();
        let analysis =
            analyze_file(&root, "pages/index.vue", "components", &[], &EmptyLogger).unwrap();
        assert_eq!(
            render(&analysis, &root, OutputFormat::Stdout),
            "pages/index.vue\n  └── components/App.vue\n"
        );
    }

    #[test]
    fn test_settings_precedence() {
        let config = ProjectConfig {
            components_dir: Some("src/components".into()),
            format: Some(OutputFormat::Report),
            port: Some(4000),
            out_dir: None,
            ignore: vec!["legacy".into()],
        };
        let cli = Overrides {
            format: Some(OutputFormat::Dot),
            ignore: vec!["**/*.stories.vue".into()],
            ..Default::default()
        };
        let settings = Settings::resolve(cli, config).unwrap();
        assert_eq!(settings.components_dir, "src/components");
        assert_eq!(settings.format, OutputFormat::Dot);
        assert_eq!(settings.output.as_deref(), Some("vurif.dot"));
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.out_dir, DEFAULT_OUT_DIR);
        assert_eq!(settings.ignore, vec!["legacy", "**/*.stories.vue"]);
    }

    #[test]
    fn test_graph_ignores_output_file() {
        let cli = Overrides {
            components_dir: Some("components".into()),
            format: Some(OutputFormat::Graph),
            output: Some("graph.txt".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(cli, ProjectConfig::default()).unwrap();
        assert_eq!(settings.output, None);

        let fs = project();
        let root = fs.root();
        let analysis =
            analyze_file(&root, "pages/index.vue", "components", &[], &EmptyLogger).unwrap();
        let mut stdout = Vec::new();
        emit(&analysis, &settings, &root, &mut stdout, &EmptyLogger).unwrap();

        assert!(!root.join("graph.txt").unwrap().exists().unwrap());
        assert!(String::from_utf8(stdout).unwrap().starts_with("Wrote 5 graph elements to "));
    }

    #[test]
    fn test_components_dir_is_required() {
        let err = Settings::resolve(Overrides::default(), ProjectConfig::default()).unwrap_err();
        assert_eq!(err, VurifError::MissingComponentsDir);
    }

    proptest! {
        #[test]
        fn prop_end_to_end(kebab_tag in any::<bool>(), kebab_file in any::<bool>()) {
            let tag = if kebab_tag { "user-card" } else { "UserCard" };
            let file = if kebab_file { "user-card" } else { "UserCard" };
            let entries = vec![
                ("proj/.gitignore".to_string(), "ignored/".to_string()),
                ("proj/pages/index.vue".to_string(), format!("<template><main><{tag}/></main></template>")),
                (format!("proj/components/{file}.vue"), "<template><Avatar/></template>".to_string()),
                ("proj/components/Avatar.vue".to_string(), "<template><img/></template>".to_string()),
                ("proj/components/ignored/Avatar.vue".to_string(), "<template><Broken></template>".to_string()),
            ];
            let fs = TestFS::new(entries.iter().map(|(p, c)| (p.as_str(), c.as_str())));
            let root = fs.root().join("proj").unwrap();
            let analysis = analyze_file(&root, "pages/index.vue", "components", &[], &EmptyLogger).unwrap();

            let out = render(&analysis, &root, OutputFormat::Stdout);
            let expected = format!(
                "pages/index.vue\n  └── components/{file}.vue\n    └── components/Avatar.vue\n"
            );
            prop_assert_eq!(out, expected);
        }
    }
}
