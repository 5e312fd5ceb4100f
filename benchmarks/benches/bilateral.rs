/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lumen_benches::bench_image;
use lumen_core::colorspace::ColorSpace;
use lumen_core::options::BilateralOptions;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;
use lumen_imageprocs::bilateral::{FastBilateral, LumaBilateral};
use lumen_imageprocs::bilateral_filter::{BilateralFilter, BilateralMode};

fn fast_bilateral_bench(input: &Image, options: BilateralOptions) {
    let mut filter = FastBilateral::with_options(input, options);
    filter.perform().unwrap();
    black_box(filter.materialize().unwrap());
}

fn luma_bilateral_bench(input: &Image, options: BilateralOptions) {
    let mut filter = LumaBilateral::with_options(input, options);
    filter.perform().unwrap();
    black_box(filter.materialize_luma().unwrap());
}

fn bench_filters(c: &mut Criterion) {
    let image = bench_image(512, 384, ColorSpace::RGB);
    let pixels = image.width() * image.height();

    let mut group = c.benchmark_group("bilateral: 512x384");
    group.throughput(Throughput::Elements(pixels as u64));

    for threads in [1, 4] {
        let options = BilateralOptions::new(16.0, 0.4).set_threads(threads);

        group.bench_function(format!("fast-bilateral/{threads}-threads"), |b| {
            b.iter(|| fast_bilateral_bench(black_box(&image), options));
        });
        group.bench_function(format!("luma-bilateral/{threads}-threads"), |b| {
            b.iter(|| luma_bilateral_bench(black_box(&image), options));
        });
    }
    group.finish();
}

fn bench_auto_range(c: &mut Criterion) {
    let image = bench_image(512, 384, ColorSpace::XYZ);

    let mut group = c.benchmark_group("bilateral auto range: 512x384");

    group.bench_function("luma-bilateral", |b| {
        b.iter(|| luma_bilateral_bench(black_box(&image), BilateralOptions::new_auto()));
    });
    group.bench_function("operation/luminance", |b| {
        let op = BilateralFilter::with_options(BilateralOptions::new_auto(), BilateralMode::Luminance);
        b.iter(|| black_box(op.clone_and_execute(&image).unwrap()));
    });
    group.finish();
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_filters, bench_auto_range);

criterion_main!(benches);
