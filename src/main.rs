/// Save the sample drawing, load it back and print it as text.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use vecdraw::config::AppConfig;

    let config = AppConfig::load_or_default();
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("drawing.vd"));

    match run(&config, &path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(
    config: &vecdraw::config::AppConfig,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use vecdraw::demo;
    use vecdraw::format::{Document, FigureRegistry};
    use vecdraw::pipeline::{TransformParams, TransformRegistry};
    use vecdraw::render::{TextBoard, draw_all};

    let figures = FigureRegistry::new();
    for name in figures.names() {
        let labels: Vec<_> = figures
            .field_labels(name)?
            .into_iter()
            .map(|(_, label)| label)
            .collect();
        log::debug!("Figure type {}: {}", name, labels.join(", "));
    }
    let transforms = TransformRegistry::new();
    log::debug!("Available transforms: {:?}", transforms.available());

    let params = TransformParams {
        passphrase: std::env::var("VECDRAW_PASSPHRASE").ok(),
    };
    let pipeline = transforms.build_with_order(
        &config.pipeline.transforms,
        &params,
        config.pipeline.read_order,
    )?;

    let document = Document::new(demo::try_sample_drawing()?);
    document.save(path, &pipeline)?;

    let outcome = Document::load(path, &figures, &pipeline)?;
    for warning in &outcome.warnings {
        log::warn!("{}", warning);
    }

    let mut board = TextBoard::new();
    draw_all(&mut board, &outcome.document.root().draw_info()?);
    print!("{}", board);
    Ok(())
}

// No native entry point on WASM
#[cfg(target_arch = "wasm32")]
fn main() {}
