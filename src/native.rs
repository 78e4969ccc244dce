//! Llamadas nativas a winspool.

pub fn wide_null(s: &str) -> Vec<u16> {
    let mut v: Vec<u16> = s.encode_utf16().collect();
    v.push(0);
    v
}

/// Marca la impresora indicada (por nombre) como predeterminada del usuario.
#[cfg(windows)]
pub fn set_default_printer(display_name: &str) -> Result<(), String> {
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::Graphics::Printing::SetDefaultPrinterW;

    let name = wide_null(display_name);
    let ok = unsafe { SetDefaultPrinterW(name.as_ptr()) };
    if ok != 0 {
        Ok(())
    } else {
        let code = unsafe { GetLastError() };
        Err(format!("SetDefaultPrinterW falló (error {code})"))
    }
}

#[cfg(not(windows))]
pub fn set_default_printer(_display_name: &str) -> Result<(), String> {
    Err("Cambiar la impresora predeterminada solo está soportado en Windows".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_null_terminates_and_encodes() {
        let w = wide_null("ab");
        assert_eq!(w, vec![b'a' as u16, b'b' as u16, 0]);
        // Fuera del BMP: un par sustituto + terminador.
        assert_eq!(wide_null("🖨").len(), 3);
        assert_eq!(wide_null(""), vec![0]);
    }
}
