//! Operaciones delegadas a la utilería de configuración de impresoras del
//! sistema: `rundll32.exe printui.dll,PrintUIEntry`.
//!
//! Alta, baja y cambio de puerto mutan el spooler y requieren elevación
//! (verbo "runas"); abrir la cola o las propiedades no. Las operaciones
//! elevadas esperan a que el proceso termine, igual que el resto de la UI,
//! y el llamador refresca el listado después.

#[cfg(windows)]
use crate::native::wide_null;

const PRINTUI: &str = "printui.dll,PrintUIEntry";

/// Alta de impresora local: `/if` instala desde el .inf indicado.
pub fn add_printer(display_name: &str, port: &str, inf_path: &str, model: &str) -> Result<(), String> {
    run_elevated(&add_args(display_name, port, inf_path, model))
}

pub fn delete_printer(display_name: &str) -> Result<(), String> {
    run_elevated(&delete_args(display_name))
}

pub fn set_port(display_name: &str, port: &str) -> Result<(), String> {
    run_elevated(&set_port_args(display_name, port))
}

pub fn open_queue(display_name: &str) -> Result<(), String> {
    run_detached(&queue_args(display_name))
}

pub fn open_properties(display_name: &str) -> Result<(), String> {
    run_detached(&properties_args(display_name))
}

fn add_args(display_name: &str, port: &str, inf_path: &str, model: &str) -> String {
    format!(r#"{PRINTUI} /if /b "{display_name}" /f "{inf_path}" /r "{port}" /m "{model}""#)
}

fn delete_args(display_name: &str) -> String {
    format!(r#"{PRINTUI} /dl /n "{display_name}""#)
}

fn set_port_args(display_name: &str, port: &str) -> String {
    format!(r#"{PRINTUI} /Xs /n "{display_name}" PortName "{port}""#)
}

fn queue_args(display_name: &str) -> String {
    format!(r#"{PRINTUI} /o /n "{display_name}""#)
}

fn properties_args(display_name: &str) -> String {
    format!(r#"{PRINTUI} /p /n "{display_name}""#)
}

/// Lanza rundll32 elevado y bloquea hasta que termine. Si el usuario
/// rechaza el UAC, ShellExecuteExW falla con ERROR_CANCELLED.
#[cfg(windows)]
fn run_elevated(params: &str) -> Result<(), String> {
    use windows_sys::Win32::Foundation::{CloseHandle, GetLastError};
    use windows_sys::Win32::System::Threading::{WaitForSingleObject, INFINITE};
    use windows_sys::Win32::UI::Shell::{
        ShellExecuteExW, SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW,
    };
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_HIDE;

    let verb = wide_null("runas");
    let file = wide_null("rundll32.exe");
    let params_w = wide_null(params);

    unsafe {
        let mut info: SHELLEXECUTEINFOW = core::mem::zeroed();
        info.cbSize = core::mem::size_of::<SHELLEXECUTEINFOW>() as u32;
        info.fMask = SEE_MASK_NOCLOSEPROCESS;
        info.lpVerb = verb.as_ptr();
        info.lpFile = file.as_ptr();
        info.lpParameters = params_w.as_ptr();
        info.nShow = SW_HIDE;

        if ShellExecuteExW(&mut info) == 0 {
            let code = GetLastError();
            return Err(format!(
                "La operación no se ejecutó (error {code}); se requiere elevación."
            ));
        }

        if !info.hProcess.is_null() {
            let _ = WaitForSingleObject(info.hProcess, INFINITE);
            let _ = CloseHandle(info.hProcess);
        }
    }

    Ok(())
}

/// Lanza rundll32 sin elevar y sin esperar (cola / propiedades abren su
/// propia ventana).
#[cfg(windows)]
fn run_detached(params: &str) -> Result<(), String> {
    use windows_sys::Win32::UI::Shell::ShellExecuteW;
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_HIDE;

    let file = wide_null("rundll32.exe");
    let params_w = wide_null(params);

    let ret = unsafe {
        ShellExecuteW(
            core::ptr::null_mut(),
            core::ptr::null(),
            file.as_ptr(),
            params_w.as_ptr(),
            core::ptr::null(),
            SW_HIDE,
        )
    };

    // Contrato histórico de ShellExecute: <= 32 es un código de error.
    if ret as isize > 32 {
        Ok(())
    } else {
        Err(format!("No se pudo abrir printui (código {})", ret as isize))
    }
}

#[cfg(not(windows))]
fn run_elevated(_params: &str) -> Result<(), String> {
    Err("printui.dll solo existe en Windows".to_string())
}

#[cfg(not(windows))]
fn run_detached(_params: &str) -> Result<(), String> {
    Err("printui.dll solo existe en Windows".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_match_printui_contract() {
        let args = add_args(
            "HP LaserJet",
            "IP_10.0.0.7",
            r"C:\drivers\hp\hpcu250u.inf",
            "HP Universal Printing PCL 6",
        );
        assert_eq!(
            args,
            r#"printui.dll,PrintUIEntry /if /b "HP LaserJet" /f "C:\drivers\hp\hpcu250u.inf" /r "IP_10.0.0.7" /m "HP Universal Printing PCL 6""#
        );
    }

    #[test]
    fn delete_args_use_display_name() {
        assert_eq!(
            delete_args("Etiquetadora"),
            r#"printui.dll,PrintUIEntry /dl /n "Etiquetadora""#
        );
    }

    #[test]
    fn set_port_args_pass_portname_property() {
        assert_eq!(
            set_port_args("Etiquetadora", "COM3"),
            r#"printui.dll,PrintUIEntry /Xs /n "Etiquetadora" PortName "COM3""#
        );
    }

    #[test]
    fn queue_and_properties_args() {
        assert_eq!(
            queue_args("HP LaserJet"),
            r#"printui.dll,PrintUIEntry /o /n "HP LaserJet""#
        );
        assert_eq!(
            properties_args("HP LaserJet"),
            r#"printui.dll,PrintUIEntry /p /n "HP LaserJet""#
        );
    }
}
