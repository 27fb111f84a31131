use anyhow::{Context, Result, bail};
use scribe_application::WorkshopEvent;
use scribe_core::session::ImageStatus;
use scribe_execution::{BootstrapOptions, bootstrap};
use scribe_infrastructure::export::{export_report_markdown, write_audio_wav, write_report_markdown};
use scribe_infrastructure::file_source::read_selected_files;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;

pub struct RunArgs {
    pub files: Vec<PathBuf>,
    pub title: Option<String>,
    pub report_out: Option<PathBuf>,
    pub audio_out: Option<PathBuf>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let app = bootstrap(BootstrapOptions::default()).await?;
    let progress = tokio::spawn(print_progress(app.events));
    let usecase = app.usecase;

    let session = usecase.create_session().await;
    if let Some(title) = args.title {
        usecase.rename_session(&session.id, title).await?;
    }

    let files = read_selected_files(&args.files)
        .await
        .context("Failed to read input files")?;
    let batch = usecase.add_images(&session.id, files).await?;
    if batch.image_ids.is_empty() {
        bail!("None of the given files is an image");
    }

    let results = batch.wait().await;
    let done = results
        .iter()
        .filter(|(_, status)| *status == Some(ImageStatus::Done))
        .count();
    println!("Analysed {} of {} image(s)", done, results.len());

    let report = usecase.generate_report(&session.id).await?;
    let report_path = match args.report_out {
        Some(path) if path.is_dir() => export_report_markdown(&report, &path).await?,
        Some(path) => {
            write_report_markdown(&report, &path).await?;
            path
        }
        None => export_report_markdown(&report, &std::env::current_dir()?).await?,
    };
    println!("Report written to {}", report_path.display());

    if let Some(audio_path) = args.audio_out {
        let audio = usecase.generate_audio(&session.id).await?;
        write_audio_wav(&audio, &audio_path).await?;
        println!(
            "Audio overview ({:.1}s) written to {}",
            audio.duration().as_secs_f64(),
            audio_path.display()
        );
    }

    // Dropping the use case closes the event channel.
    drop(usecase);
    let _ = progress.await;
    Ok(())
}

async fn print_progress(mut events: UnboundedReceiver<WorkshopEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            WorkshopEvent::ImagesAdded { image_ids, skipped, .. } => {
                println!("Added {} image(s)", image_ids.len());
                if skipped > 0 {
                    println!("Skipped {} file(s) that are not images", skipped);
                }
            }
            WorkshopEvent::ImageStatusChanged {
                image_id, status, ..
            } if status.is_terminal() => {
                println!("  image {} -> {}", image_id, status);
            }
            WorkshopEvent::ReportStarted { .. } => println!("Synthesizing report..."),
            WorkshopEvent::ReportReady { tier, .. } => println!("Report ready ({} model)", tier),
            WorkshopEvent::ReportFailed { message, .. } => eprintln!("Report failed: {}", message),
            WorkshopEvent::AudioStarted { .. } => println!("Generating audio overview..."),
            WorkshopEvent::AudioFailed { message, .. } => eprintln!("Audio overview failed: {}", message),
            _ => {}
        }
    }
}
