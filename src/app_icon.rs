use std::io::Cursor;

/// Icono de la ventana a partir del `icon.ico` embebido (el mismo que
/// build.rs mete como recurso del .exe). Elegimos el frame más grande
/// del .ico y lo entregamos como RGBA a eframe.
pub fn eframe_icon_data() -> Option<eframe::egui::IconData> {
    let dir = ico::IconDir::read(Cursor::new(include_bytes!("../icon.ico"))).ok()?;
    let best = dir
        .entries()
        .iter()
        .max_by_key(|e| (e.width() as u32) * (e.height() as u32))?
        .decode()
        .ok()?;

    Some(eframe::egui::IconData {
        width: best.width() as u32,
        height: best.height() as u32,
        rgba: best.rgba_data().to_vec(),
    })
}
