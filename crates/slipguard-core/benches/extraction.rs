//! Benchmarks for slipguard-core name resolution and extraction.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use slipguard_core::ExtractConfig;
use slipguard_core::NoopObserver;
use slipguard_core::extract_from_reader;
use slipguard_core::security::resolve;
use slipguard_core::test_utils::RawZipBuilder;
use slipguard_core::types::DestDir;
use std::hint::black_box;
use std::io::Cursor;
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates a ZIP archive with many small stored files.
fn create_many_small_files_zip(file_count: usize) -> Vec<u8> {
    let mut builder = RawZipBuilder::new();
    for i in 0..file_count {
        builder = builder.add_file(&format!("file{i:04}.txt"), format!("content{i}").as_bytes());
    }
    builder.build()
}

/// Creates a ZIP archive with nested directory entries and files.
fn create_nested_dirs_zip(depth: usize, files_per_dir: usize) -> Vec<u8> {
    let mut builder = RawZipBuilder::new();
    let mut prefix = String::new();
    for _ in 0..depth {
        prefix.push_str("subdir/");
        builder = builder.add_directory(&prefix);
        for i in 0..files_per_dir {
            builder = builder.add_file(&format!("{prefix}file{i}.txt"), b"content");
        }
    }
    builder.build()
}

/// Creates a ZIP archive with one DEFLATE compressed file.
fn create_deflate_compressed_zip(size_bytes: usize) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("compressed.bin", options).unwrap();
    zip.write_all(&vec![0u8; size_bytes]).unwrap();

    zip.finish().unwrap().into_inner()
}

fn extract_into_temp(data: &[u8]) {
    let temp = TempDir::new().unwrap();
    extract_from_reader(
        Cursor::new(data),
        temp.path(),
        &ExtractConfig::default(),
        &mut NoopObserver,
    )
    .unwrap();
}

fn benchmark_resolve(c: &mut Criterion) {
    let dest = DestDir::new("/srv/extract/out").unwrap();
    let mut group = c.benchmark_group("resolve");

    for name in [
        "a.txt",
        "deeply/nested/path/to/some/file.txt",
        "a/./b/../c/./d/../e.txt",
        "../../etc/passwd",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| resolve(black_box(name), &dest));
        });
    }
    group.finish();
}

fn benchmark_many_small_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_small_files");

    for file_count in [100, 1000] {
        let zip_data = create_many_small_files_zip(file_count);
        group.throughput(Throughput::Elements(file_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &zip_data,
            |b, data| b.iter(|| extract_into_temp(data)),
        );
    }
    group.finish();
}

fn benchmark_nested_directories(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_directories");

    for depth in [5, 20] {
        let zip_data = create_nested_dirs_zip(depth, 2);
        group.throughput(Throughput::Elements(depth as u64 * 3));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &zip_data, |b, data| {
            b.iter(|| extract_into_temp(data));
        });
    }
    group.finish();
}

fn benchmark_deflate(c: &mut Criterion) {
    let mut group = c.benchmark_group("deflate");

    for size_mb in [1, 10] {
        let size_bytes = size_mb * 1024 * 1024;
        let zip_data = create_deflate_compressed_zip(size_bytes);
        group.throughput(Throughput::Bytes(size_bytes as u64));
        group.bench_with_input(
            BenchmarkId::new("size_mb", size_mb),
            &zip_data,
            |b, data| b.iter(|| extract_into_temp(data)),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_resolve,
    benchmark_many_small_files,
    benchmark_nested_directories,
    benchmark_deflate
);
criterion_main!(benches);
