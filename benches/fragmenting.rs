//! Benchmarks for segmentation and batched fragmentation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::Value;
use splinters::{BatchWorkerPool, LengthWindow, Record, RecordFragmenter, Segmenter};

fn sample_text(chars: usize) -> String {
    // Realistic mix: short sentences, comma-heavy long sentences, and an
    // undelimited run that forces the fixed-width fallback.
    let sentences = [
        "今天的天氣非常好，我們決定一起出去公園玩，順便帶上準備好的點心。",
        "資料處理流程需要先讀取紀錄，再切分文本，最後寫出結果。",
        "這一句比較短。",
        "模型訓練語料的品質，取決於切分是否乾淨，以及長度是否落在視窗之內，這些都要靠前處理把關。",
    ];
    let mut text = String::new();
    let mut i = 0;
    while text.chars().count() < chars {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text
}

fn sample_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut record = Record::new();
            record.insert("doc_id".to_owned(), Value::from(i as u64));
            record.insert("text".to_owned(), Value::from(sample_text(800)));
            record
        })
        .collect()
}

fn bench_segmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmenter");
    let window = LengthWindow::new(30, 250).unwrap();
    let segmenter = Segmenter::new(window);

    for chars in [1_000, 10_000, 100_000] {
        let text = sample_text(chars);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("segment", chars), &text, |b, text| {
            b.iter(|| segmenter.segment(black_box(text)))
        });
    }

    group.finish();
}

fn bench_batch_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_pool");
    let window = LengthWindow::new(30, 250).unwrap();

    for workers in [1, 2, 4] {
        let records = sample_records(256);
        let pool =
            BatchWorkerPool::new(RecordFragmenter::new(window, "text"), workers).unwrap();

        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &records,
            |b, records| b.iter(|| pool.process_batch(black_box(records))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_segmenter, bench_batch_pool);
criterion_main!(benches);
