use crate::{ChannelProgress, PdfCommand, PdfUpdate};
use pdf_unbooklet::{
    PosterOptions, ProgressSink, SampleBooklet, UnbookletOptions, calculate_statistics,
    create_sample_booklet, load_pdf, poster, save_pdf, unbooklet,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Async worker task that processes PDF commands and sends updates
///
/// Runs until every command sender has been dropped.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Worker stopped");
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::Unbooklet {
            options,
            output_path,
        } => handle_unbooklet(options, output_path, update_tx).await,
        PdfCommand::Poster {
            options,
            output_path,
        } => handle_poster(options, output_path, update_tx).await,
        PdfCommand::CreateSample {
            sample,
            output_path,
        } => handle_create_sample(sample, output_path, update_tx).await,
        PdfCommand::LoadConfig { path } => handle_load_config(path, update_tx).await,
        PdfCommand::CalculateStats { input_path } => {
            handle_calculate_stats(input_path, update_tx).await
        }
    }
}

fn send_error(update_tx: &mpsc::UnboundedSender<PdfUpdate>, message: String) {
    log::error!("{}", message);
    let _ = update_tx.send(PdfUpdate::Error { message });
}

async fn handle_unbooklet(
    options: UnbookletOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let source = match load_pdf(&options.input_file).await {
        Ok(doc) => doc,
        Err(e) => {
            return send_error(
                update_tx,
                format!("Failed to load {}: {}", options.input_file.display(), e),
            );
        }
    };

    let progress: Arc<dyn ProgressSink> = Arc::new(ChannelProgress::new(update_tx.clone()));
    let output = match unbooklet(&source, &options, progress).await {
        Ok(doc) => doc,
        Err(e) => return send_error(update_tx, format!("Failed to reassemble booklet: {}", e)),
    };

    let page_count = output.get_pages().len();
    match save_pdf(output, &output_path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::UnbookletComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => send_error(update_tx, format!("Failed to save output: {}", e)),
    }
}

async fn handle_poster(
    options: PosterOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let source = match load_pdf(&options.input_file).await {
        Ok(doc) => doc,
        Err(e) => {
            return send_error(
                update_tx,
                format!("Failed to load {}: {}", options.input_file.display(), e),
            );
        }
    };

    let progress: Arc<dyn ProgressSink> = Arc::new(ChannelProgress::new(update_tx.clone()));
    let output = match poster(&source, &options, progress).await {
        Ok(doc) => doc,
        Err(e) => return send_error(update_tx, format!("Failed to create poster: {}", e)),
    };

    let page_count = output.get_pages().len();
    match save_pdf(output, &output_path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::PosterComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => send_error(update_tx, format!("Failed to save output: {}", e)),
    }
}

async fn handle_create_sample(
    sample: SampleBooklet,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let doc = match create_sample_booklet(&sample) {
        Ok(doc) => doc,
        Err(e) => return send_error(update_tx, format!("Failed to create sample: {}", e)),
    };

    let page_count = doc.get_pages().len();
    match save_pdf(doc, &output_path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::SampleComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => send_error(update_tx, format!("Failed to save sample: {}", e)),
    }
}

async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match UnbookletOptions::load(&path).await {
        Ok(options) => {
            let _ = update_tx.send(PdfUpdate::ConfigLoaded { options });
        }
        Err(e) => send_error(
            update_tx,
            format!("Failed to load config {}: {}", path.display(), e),
        ),
    }
}

async fn handle_calculate_stats(input_path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let result = load_pdf(&input_path)
        .await
        .and_then(|doc| calculate_statistics(&doc));
    match result {
        Ok(stats) => {
            let _ = update_tx.send(PdfUpdate::StatsCalculated { stats });
        }
        Err(e) => send_error(update_tx, format!("Failed to calculate statistics: {}", e)),
    }
}
