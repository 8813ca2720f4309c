use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=HUGENUM_LIMB_WIDTH");
    println!("cargo:rustc-check-cfg=cfg(limb_width_32)");
    println!("cargo:rustc-check-cfg=cfg(limb_width_64)");

    // Decide ideal limb width for arithmetic. Refer to src/math.rs for where
    // this has an effect. The build script runs on the host, so look at the
    // target through cargo's environment rather than cfg!.
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let native_64 = matches!(
        target_arch.as_str(),
        "aarch64" | "mips64" | "powerpc64" | "x86_64" | "riscv64" | "loongarch64" | "s390x"
    );

    let limb_width_64 = match env::var("HUGENUM_LIMB_WIDTH").as_deref() {
        Ok("32") => false,
        Ok("64") => true,
        Ok(other) => {
            println!(
                "cargo:warning=ignoring HUGENUM_LIMB_WIDTH={}, expected 32 or 64",
                other
            );
            native_64
        }
        Err(_) => native_64,
    };

    if limb_width_64 {
        println!("cargo:rustc-cfg=limb_width_64");
    } else {
        println!("cargo:rustc-cfg=limb_width_32");
    }
}
