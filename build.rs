//! Embeds the Windows resource metadata from `[package.metadata.winresource]`.

fn main() {
    #[cfg(windows)]
    {
        let res = winresource::WindowsResource::new();
        if let Err(e) = res.compile() {
            println!("cargo:warning=Failed to compile Windows resources: {}", e);
        }
    }
}
