#![cfg(feature = "remote-assets")]

use ticketfront::ticket::TicketView;
use ticketfront::{RasterOptions, Rasterizer, RegistrationResult};

// 1x1 red PNG
const RED_DOT_PNG: &[u8] = &[
    137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8, 6,
    0, 0, 0, 31, 21, 196, 137, 0, 0, 0, 13, 73, 68, 65, 84, 120, 218, 99, 252, 207, 192, 80, 15,
    0, 4, 133, 1, 128, 132, 169, 140, 33, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
];

fn view_with_qr(url: &str) -> TicketView {
    let data: RegistrationResult = serde_json::from_str(&format!(
        r#"{{"fullName":"A","email":"a@x","registrationId":"R1","qr":"{}"}}"#,
        url
    ))
    .unwrap();
    TicketView::from_registration(&data)
}

#[test]
fn remote_qr_is_fetched_and_blitted() {
    let server = tiny_http::Server::http("0.0.0.0:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = tiny_http::Response::from_data(RED_DOT_PNG.to_vec())
                .with_header("Content-Type: image/png".parse::<tiny_http::Header>().unwrap());
            let _ = request.respond(response);
        }
    });

    let view = view_with_qr(&format!("http://{}/qr.png", addr));
    let mut bare = view.clone();
    bare.qr = None;

    let rasterizer = ticketfront::new_rasterizer();
    let with_qr = rasterizer.rasterize(&view, &RasterOptions::default()).unwrap();
    let without = rasterizer.rasterize(&bare, &RasterOptions::default()).unwrap();
    assert_ne!(with_qr.png_data, without.png_data, "remote QR must affect the raster");
}

#[test]
fn fetch_failure_still_produces_a_ticket() {
    // Nothing listens on this port for long enough; the asset degrades to a
    // placeholder instead of failing the raster.
    let view = view_with_qr("http://127.0.0.1:1/qr.png");
    let shot = ticketfront::new_rasterizer()
        .rasterize(&view, &RasterOptions::default())
        .unwrap();
    assert!(!shot.png_data.is_empty());
}

#[test]
fn remote_fetch_respects_allow_remote_flag() {
    let view = view_with_qr("http://127.0.0.1:1/qr.png");
    let opts = RasterOptions { allow_remote: false, ..Default::default() };
    // Disallowed remote asset also degrades to a placeholder
    let shot = ticketfront::new_rasterizer().rasterize(&view, &opts).unwrap();
    assert!(!shot.png_data.is_empty());
}
