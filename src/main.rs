use clap::Parser;
use modera::logger::{self, LogLevel, LoggerConfig};
use modera::{
    AgeGroup, AttributeSet, AuthState, CameraView, FashionStyle, Gender, ImagePayload, ModelPose,
    SkinTone, Studio, StudioConfig,
};
use std::path::PathBuf;

/// Generate a studio photograph of a model wearing the garment in an image
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Garment photo to dress the model in
    #[arg(short, long, required_unless_present = "list_attributes")]
    image: Option<PathBuf>,

    #[arg(long, default_value = "Female")]
    gender: Gender,

    #[arg(long, default_value = "Young Adult (18-25)")]
    age_group: AgeGroup,

    #[arg(long, default_value = "Medium")]
    skin_tone: SkinTone,

    #[arg(long, default_value = "Modern Chic")]
    style: FashionStyle,

    #[arg(long, default_value = "Standing Confident")]
    pose: ModelPose,

    #[arg(long, default_value = "Front View")]
    view: CameraView,

    /// Directory the generated PNG is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Print every accepted attribute value and exit
    #[arg(long)]
    list_attributes: bool,

    /// Debug level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn attributes(&self) -> AttributeSet {
        AttributeSet {
            gender: self.gender,
            age_group: self.age_group,
            skin_tone: self.skin_tone,
            style: self.style,
            pose: self.pose,
            view: self.view,
        }
    }
}

fn print_catalog() {
    fn section<T: std::fmt::Display>(name: &str, values: &[T], slug: fn(&T) -> &'static str) {
        println!("{}:", name);
        for value in values {
            println!("  {:<28} ({})", value.to_string(), slug(value));
        }
    }

    section("--gender", Gender::ALL, Gender::slug);
    section("--age-group", AgeGroup::ALL, AgeGroup::slug);
    section("--skin-tone", SkinTone::ALL, SkinTone::slug);
    section("--style", FashionStyle::ALL, FashionStyle::slug);
    section("--pose", ModelPose::ALL, ModelPose::slug);
    section("--view", CameraView::ALL, CameraView::slug);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.list_attributes {
        print_catalog();
        return Ok(());
    }

    let dotenv_result = dotenv::dotenv();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logger::init_with_config(LoggerConfig::new().with_level(level))?;
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match dotenv_result {
        Ok(path) => log::info!("✅ Loaded {}", path.display()),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = StudioConfig::from_env();
    logger::log_config_info(&config);

    let studio = Studio::from_config(&config)?;

    let mut state = studio.connect().await;
    if state == AuthState::NoCredential {
        log::info!("🔑 No API key selected, running key selection...");
        let (next, selection) = studio.select_credential(state).await;
        if let Err(e) = selection {
            log::error!("❌ Failed to select API key: {}", e);
            return Err(e.into());
        }
        state = next;
    }

    let image_path = args
        .image
        .as_ref()
        .ok_or("an --image path is required")?;
    let image = ImagePayload::from_path(image_path).await?;
    let attrs = args.attributes();
    log::info!(
        "🎨 {} {} model, {} skin, {}, {}, {}",
        attrs.age_group,
        attrs.gender,
        attrs.skin_tone,
        attrs.style,
        attrs.pose,
        attrs.view
    );

    let mut status = studio.subscribe_status();
    let status_printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let message = *status.borrow_and_update();
            log::info!("⏳ {}", message);
        }
    });

    let outcome = studio.generate(state, image, attrs).await;
    status_printer.abort();

    if let Some(message) = outcome.user_message() {
        log::error!("❌ {}", message);
        if outcome.state == AuthState::NoCredential {
            log::warn!("🔑 The API key was rejected; select a key with access to the image models");
        }
    }

    let image = outcome.result?;
    let path = image.save_to(&args.out_dir).await?;
    log::info!("✅ Studio image from {} saved to {}", image.model, path.display());

    Ok(())
}
