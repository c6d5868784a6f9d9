//! End-to-End Fragmentation
//!
//! The full pipeline over a handful of in-memory records.
//!
//! ```bash
//! RUST_LOG=info cargo run --example pipeline
//! ```

use serde_json::Value;
use splinters::{
    BatchOrchestrator, FragmentRecord, LengthWindow, PipelineConfig, Record,
};

fn record(doc_id: u64, text: &str) -> Record {
    let mut record = Record::new();
    record.insert("doc_id".to_owned(), Value::from(doc_id));
    record.insert("text".to_owned(), Value::from(text));
    record
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let records = vec![
        record(1, "今天天氣很好。我們出去玩。"),
        record(2, "太短。"),
        record(
            3,
            "資料前處理的第一步是句子切分，接著把過長的句子在逗號處合併重組，\
             讓每個片段落在長度視窗之內，同時保留回溯原文的位移資訊。",
        ),
    ];

    let orchestrator = BatchOrchestrator::new(PipelineConfig {
        window: LengthWindow::new(5, 40)?,
        worker_count: 2,
        ..PipelineConfig::default()
    })?;

    let fragments = orchestrator.run(&records);
    println!("records in: {}, fragments out: {}\n", records.len(), fragments.len());

    for fragment in fragments {
        let text = fragment.fields["text"].as_str().unwrap_or_default().to_owned();
        println!(
            "doc {} [{}:{}] chars {}..{}: {}",
            fragment.fields["doc_id"],
            fragment.meta.original_index,
            fragment.meta.fragment_index,
            fragment.meta.fragment_start,
            fragment.meta.fragment_end,
            text
        );

        // Flat rows are what a tabular sink would persist.
        let row: Record = FragmentRecord::into_record(fragment);
        debug_assert_eq!(row["source_type"], Value::from("sentence_fragment"));
    }

    Ok(())
}
