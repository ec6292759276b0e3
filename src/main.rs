use famicore::{Console, ConsoleConfig, CpuError, Nrom};

fn build_demo_prg() -> Vec<u8> {
    // PRG ROM 16KB, filled with NOP
    let mut prg = vec![0xEAu8; 16 * 1024];

    // Program at $8000 (offset 0x0000 in PRG)
    let program: &[u8] = &[
        0xA9, 0x10, // LDA #$10
        0x69, 0x05, // ADC #$05 => A = 0x15
        0x8D, 0x00, 0x02, // STA $0200
        0xE8, // INX
        0xD0, 0xFD, // BNE -3 -> loop until X wraps to 0
        0x00, 0x00, // BRK (handler at $8010)
        0xEA, 0xEA, 0xEA, 0xEA, // padding up to $8010
        0xC8, // $8010: INY
        0x02, // illegal opcode: stops the demo
    ];
    prg[..program.len()].copy_from_slice(program);

    // Vectors (NMI, RESET, IRQ) at top of 16KB bank mirrored to $C000-$FFFF:
    // $FFFA/$FFFB (NMI), $FFFC/$FFFD (RESET), $FFFE/$FFFF (IRQ/BRK)
    let vectors: [u16; 3] = [0x8000, 0x8000, 0x8010];
    for (i, v) in vectors.iter().enumerate() {
        prg[0x3FFA + i * 2..0x3FFC + i * 2].copy_from_slice(&v.to_le_bytes());
    }
    prg
}

fn main() -> Result<(), CpuError> {
    let mut console = Console::new(Nrom::new(build_demo_prg(), 8 * 1024), ConsoleConfig::default())
        .with_fatal_handler(|e| eprintln!("CPU stopped: {e}"));
    console.power_on()?;

    // Run until the CPU halts (with a safety cap)
    match console.run(1_000_000) {
        Ok(cycles) => println!("instruction cap reached after {cycles} cycles"),
        Err(e) => println!("halted after {} cycles: {e}", console.cpu().cycles()),
    }

    let cpu = console.cpu();
    let m0200 = console.bus().read(0x0200)?;
    println!("A: 0x{:02X}", cpu.a());
    println!("X: 0x{:02X}", cpu.x());
    println!("Y: 0x{:02X}", cpu.y());
    println!("SP: 0x{:02X}", cpu.sp());
    println!("PC: 0x{:04X}", cpu.pc());
    println!("P (flags): {:?}", cpu.status());
    println!("cycles: {}", cpu.cycles());
    println!("mem[0x0200]: 0x{:02X}", m0200);
    Ok(())
}
