#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

mod app;
mod app_icon;
mod model;
mod native;
mod printer_query;
mod printui;

use eframe::egui;

const WINDOW_TITLE: &str = "Gestor de Impresoras";

#[cfg(target_os = "windows")]
fn try_focus_existing_instance_window() {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        BringWindowToTop, FindWindowW, SetForegroundWindow, SetWindowPos, ShowWindow,
        HWND_NOTOPMOST, HWND_TOPMOST, SWP_NOMOVE, SWP_NOSIZE, SWP_SHOWWINDOW, SW_RESTORE, SW_SHOW,
    };

    let title_w = crate::native::wide_null(WINDOW_TITLE);
    let hwnd = unsafe { FindWindowW(core::ptr::null(), title_w.as_ptr()) };
    if hwnd.is_null() {
        return;
    }

    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = ShowWindow(hwnd, SW_RESTORE);

        // TOPMOST -> NOTOPMOST para forzar foco.
        let _ = SetWindowPos(
            hwnd,
            HWND_TOPMOST,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_SHOWWINDOW,
        );
        let _ = SetWindowPos(
            hwnd,
            HWND_NOTOPMOST,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_SHOWWINDOW,
        );

        let _ = BringWindowToTop(hwnd);
        let _ = SetForegroundWindow(hwnd);
    }
}

fn main() -> eframe::Result<()> {
    // Single instance: dos gestores tocando el spooler a la vez solo confunden.
    let instance = single_instance::SingleInstance::new("gestor-impresoras")
        .expect("single-instance init failed");
    if !instance.is_single() {
        #[cfg(target_os = "windows")]
        {
            try_focus_existing_instance_window();
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 440.0])
            .with_title(WINDOW_TITLE)
            .with_icon(app_icon::eframe_icon_data().unwrap_or_default()),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(app::PrinterManagerApp::default()))),
    )
}
