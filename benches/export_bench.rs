use criterion::{criterion_group, criterion_main, Criterion};

use ticketfront::export::pdf::compose_a4;
use ticketfront::ticket::TicketView;
use ticketfront::{ExportConfig, RasterOptions, Rasterizer, RegistrationResult};

fn sample_view() -> TicketView {
    let data: RegistrationResult = serde_json::from_str(
        r#"{"fullName":"A. Attendee","email":"a.attendee@example.org",
            "registrationId":"BS2047-0042","institution":"IIT Delhi","category":"Student"}"#,
    )
    .expect("valid registration JSON");
    TicketView::from_registration(&data)
}

fn bench_rasterize(c: &mut Criterion) {
    let view = sample_view();
    let rasterizer = ticketfront::new_rasterizer();
    let opts = RasterOptions::default();

    c.bench_function("rasterize_ticket_2x", |b| {
        b.iter(|| {
            let _ = rasterizer.rasterize(&view, &opts).unwrap();
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let view = sample_view();
    let shot = ticketfront::new_rasterizer()
        .rasterize(&view, &RasterOptions::default())
        .expect("raster for bench");
    let config = ExportConfig::default();

    c.bench_function("compose_a4", |b| {
        b.iter(|| {
            let _ = compose_a4(&shot, &config, "BS2047-0042").unwrap();
        })
    });
}

criterion_group!(benches, bench_rasterize, bench_compose);
criterion_main!(benches);
