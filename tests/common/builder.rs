use std::collections::HashMap;

use super::record;

enum Slot {
    File { name: String, data: Vec<u8>, aux: Vec<u8> },
    Placeholder { size: u32, aux_size: u16 },
    ExtInfo,
}

/// Builds a BIOS-like image: a `RESET` payload holding a boot prefix and the
/// table, followed by every other payload on 16-byte boundaries.
pub struct ImageBuilder {
    boot_prefix: usize,
    reset_aux: Vec<u8>,
    slots: Vec<Slot>,
    trailing: usize,
}

/// A built image and where its payloads ended up.
pub struct BuiltImage {
    pub bytes: Vec<u8>,
    pub table_offset: usize,
    pub offsets: HashMap<String, u64>,
    pub extinfo_offset: Option<u64>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            boot_prefix: 0x40,
            reset_aux: Vec::new(),
            slots: Vec::new(),
            trailing: 0,
        }
    }

    /// Bytes of boot code before the table inside the RESET payload. Rounded up to 16.
    pub fn boot_prefix(mut self, len: usize) -> Self {
        self.boot_prefix = len.div_ceil(16) * 16;
        self
    }

    pub fn reset_aux(mut self, aux: &[u8]) -> Self {
        self.reset_aux = aux.to_vec();
        self
    }

    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.file_with_aux(name, data, &[])
    }

    pub fn file_with_aux(mut self, name: &str, data: &[u8], aux: &[u8]) -> Self {
        self.slots.push(Slot::File {
            name: name.to_string(),
            data: data.to_vec(),
            aux: aux.to_vec(),
        });
        self
    }

    pub fn placeholder(mut self, size: u32, aux_size: u16) -> Self {
        self.slots.push(Slot::Placeholder { size, aux_size });
        self
    }

    /// Adds the EXTINFO entry at this position in the table.
    pub fn extinfo(mut self) -> Self {
        self.slots.push(Slot::ExtInfo);
        self
    }

    /// Extra zero bytes after the last payload.
    pub fn trailing(mut self, len: usize) -> Self {
        self.trailing = len;
        self
    }

    pub fn build(self) -> BuiltImage {
        // Extinfo blocks are stored in table order, placeholders included.
        let mut ext_payload = self.reset_aux.clone();
        for slot in &self.slots {
            match slot {
                Slot::File { aux, .. } => ext_payload.extend_from_slice(aux),
                Slot::Placeholder { aux_size, .. } => {
                    ext_payload.extend(std::iter::repeat(0u8).take(*aux_size as usize))
                }
                Slot::ExtInfo => {}
            }
        }

        let table_len = (self.slots.len() + 2) * 16;
        let reset_size = self.boot_prefix + table_len;

        let mut records = vec![record("RESET", self.reset_aux.len() as u16, reset_size as u32)];
        let mut payloads: Vec<(Option<String>, Vec<u8>)> = Vec::new();
        for slot in &self.slots {
            match slot {
                Slot::File { name, data, aux } => {
                    records.push(record(name, aux.len() as u16, data.len() as u32));
                    payloads.push((Some(name.clone()), data.clone()));
                }
                Slot::Placeholder { size, aux_size } => {
                    records.push(record("-", *aux_size, *size));
                    payloads.push((None, vec![0u8; *size as usize]));
                }
                Slot::ExtInfo => {
                    records.push(record("EXTINFO", 0, ext_payload.len() as u32));
                    payloads.push((Some("EXTINFO".to_string()), ext_payload.clone()));
                }
            }
        }

        let mut bytes = super::pattern(0xB0, self.boot_prefix);
        for raw in &records {
            bytes.extend_from_slice(raw);
        }
        bytes.extend_from_slice(&[0u8; 16]);
        pad_to_16(&mut bytes);

        let mut offsets = HashMap::new();
        let mut extinfo_offset = None;
        for (name, data) in payloads {
            let offset = bytes.len() as u64;
            if let Some(name) = name {
                if name == "EXTINFO" {
                    extinfo_offset = Some(offset);
                }
                offsets.insert(name, offset);
            }
            bytes.extend_from_slice(&data);
            pad_to_16(&mut bytes);
        }
        bytes.extend(std::iter::repeat(0u8).take(self.trailing));

        BuiltImage {
            bytes,
            table_offset: self.boot_prefix,
            offsets,
            extinfo_offset,
        }
    }
}

fn pad_to_16(bytes: &mut Vec<u8>) {
    let padded = bytes.len().div_ceil(16) * 16;
    bytes.resize(padded, 0);
}
