use crate::common::MemoryBlockDevice;
use iso9660::ImageReader;
use std::io::Cursor;

const SECTOR: usize = 2048;
const RAW_SECTOR: usize = 2352;

/// First sector after the descriptor set (16 = PVD, 17 = terminator)
const FIRST_FREE: u32 = 18;

struct Dir {
    path: String,
    name: String,
    parent: usize,
    children: Vec<Child>,
}

struct File {
    name: String,
    content: Vec<u8>,
    xa: Option<u16>,
}

#[derive(Clone, Copy)]
enum Child {
    Dir(usize),
    File(usize),
}

/// Synthetic image builder
///
/// Directories and files are listed in the order they are added. Parents
/// must be added before their children.
pub struct IsoBuilder {
    dirs: Vec<Dir>,
    files: Vec<File>,
    shift: i64,
    volume_id: String,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            dirs: vec![Dir {
                path: String::new(),
                name: String::new(),
                parent: 0,
                children: Vec::new(),
            }],
            files: Vec::new(),
            shift: 0,
            volume_id: "TESTVOL".to_string(),
        }
    }

    pub fn volume_id(mut self, id: &str) -> Self {
        self.volume_id = id.to_string();
        self
    }

    /// Store everything after the descriptor set `sectors` later than recorded
    ///
    /// A negative shift models an image cropped out of a larger one.
    pub fn shift(mut self, sectors: i64) -> Self {
        self.shift = sectors;
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        let (parent, name) = self.split(path);
        let index = self.dirs.len();
        self.dirs.push(Dir {
            path: path.to_string(),
            name,
            parent,
            children: Vec::new(),
        });
        self.dirs[parent].children.push(Child::Dir(index));
        self
    }

    pub fn file(self, path: &str, content: &[u8]) -> Self {
        self.add_file(path, content, None)
    }

    pub fn xa_file(self, path: &str, content: &[u8], attributes: u16) -> Self {
        self.add_file(path, content, Some(attributes))
    }

    fn add_file(mut self, path: &str, content: &[u8], xa: Option<u16>) -> Self {
        let (parent, name) = self.split(path);
        let index = self.files.len();
        self.files.push(File {
            name,
            content: content.to_vec(),
            xa,
        });
        self.dirs[parent].children.push(Child::File(index));
        self
    }

    fn split(&self, path: &str) -> (usize, String) {
        match path.rsplit_once('/') {
            Some((parent, name)) => {
                let parent = self
                    .dirs
                    .iter()
                    .position(|d| d.path == parent)
                    .expect("parent directory must be added first");
                (parent, name.to_string())
            }
            None => (0, path.to_string()),
        }
    }

    fn child_record_len(&self, child: Child) -> usize {
        match child {
            Child::Dir(i) => record_len(self.dirs[i].name.len(), false),
            Child::File(i) => record_len(self.files[i].name.len(), self.files[i].xa.is_some()),
        }
    }

    /// Lay out a 2048-byte-sector image
    pub fn build(&self) -> BuiltIso {
        // Recorded addresses start late enough that a negative shift stays on disk
        let path_table_lba = FIRST_FREE + (-self.shift).max(0) as u32;
        let mut next = path_table_lba + 1;

        // Directory extents first, sized by packing their records
        let mut dir_extents = Vec::with_capacity(self.dirs.len());
        let mut dir_layouts = Vec::with_capacity(self.dirs.len());
        for dir in &self.dirs {
            let mut lens = vec![34, 34];
            lens.extend(dir.children.iter().map(|&c| self.child_record_len(c)));
            let (positions, sectors) = pack(&lens);
            dir_extents.push((next, sectors * SECTOR as u32));
            dir_layouts.push(positions);
            next += sectors;
        }

        let mut file_extents = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let sectors = file.content.len().div_ceil(SECTOR).max(1) as u32;
            file_extents.push((next, file.content.len() as u32));
            next += sectors;
        }

        let physical_end = (i64::from(next) + self.shift) as usize;
        let mut built = BuiltIso {
            data: vec![0u8; physical_end * SECTOR],
            shift: self.shift,
            path_table_lba,
            root: dir_extents[0],
            extents: Vec::new(),
        };

        self.write_pvd(&mut built, next);
        write_descriptor_header(built.logical_mut(17), 255);

        // Type M path table, root record only
        let table = built.recorded_mut(path_table_lba);
        table[0] = 1;
        table[2..6].copy_from_slice(&dir_extents[0].0.to_be_bytes());
        table[6..8].copy_from_slice(&1u16.to_be_bytes());

        for (d, dir) in self.dirs.iter().enumerate() {
            let (lba, len) = dir_extents[d];
            let parent = dir_extents[dir.parent];
            let mut records = vec![
                encode_record(lba, len, 0x02, &[0], None),
                encode_record(parent.0, parent.1, 0x02, &[1], None),
            ];
            for &child in &dir.children {
                records.push(match child {
                    Child::Dir(i) => {
                        let (clba, clen) = dir_extents[i];
                        encode_record(clba, clen, 0x02, self.dirs[i].name.as_bytes(), None)
                    }
                    Child::File(i) => {
                        let (flba, flen) = file_extents[i];
                        let file = &self.files[i];
                        encode_record(flba, flen, 0x00, file.name.as_bytes(), file.xa)
                    }
                });
            }
            for (record, &(sector, offset)) in records.iter().zip(&dir_layouts[d]) {
                let dst = built.recorded_mut(lba + sector);
                dst[offset..offset + record.len()].copy_from_slice(record);
            }
            if d > 0 {
                built.extents.push((dir.path.clone(), lba, len));
            }
        }

        for (f, file) in self.files.iter().enumerate() {
            let (lba, len) = file_extents[f];
            let start = built.sector_offset(lba);
            built.data[start..start + file.content.len()].copy_from_slice(&file.content);
            let path = self
                .dirs
                .iter()
                .find(|d| d.children.iter().any(|c| matches!(c, Child::File(i) if *i == f)))
                .map(|d| join(&d.path, &file.name))
                .unwrap_or_else(|| file.name.clone());
            built.extents.push((path, lba, len));
        }

        built
    }

    fn write_pvd(&self, built: &mut BuiltIso, volume_end: u32) {
        let path_table_lba = built.path_table_lba;
        let (root_lba, root_len) = built.root;
        let pvd = built.logical_mut(16);
        write_descriptor_header(pvd, 1);
        write_padded(&mut pvd[8..40], "TEST SYSTEM");
        write_padded(&mut pvd[40..72], &self.volume_id);
        write_both_endian_u32(&mut pvd[80..88], volume_end);
        write_both_endian_u16(&mut pvd[120..124], 1);
        write_both_endian_u16(&mut pvd[124..128], 1);
        write_both_endian_u16(&mut pvd[128..132], SECTOR as u16);
        write_both_endian_u32(&mut pvd[132..140], 10);
        pvd[148..152].copy_from_slice(&path_table_lba.to_be_bytes());

        let root = encode_record(root_lba, root_len, 0x02, &[0], None);
        pvd[156..156 + root.len()].copy_from_slice(&root);

        for (offset, len) in [(190, 128), (318, 128), (446, 128), (574, 128)] {
            write_padded(&mut pvd[offset..offset + len], "");
        }
        write_padded(&mut pvd[574..702], "ISOBUILDER");
        pvd[813..829].copy_from_slice(b"2001010112000000");
        pvd[829] = 4;
        pvd[881] = 1;
    }
}

/// A built image plus the recorded location of everything in it
pub struct BuiltIso {
    /// 2048-byte-sector image bytes
    pub data: Vec<u8>,
    pub shift: i64,
    pub path_table_lba: u32,
    /// Recorded root extent (lba, length)
    pub root: (u32, u32),
    /// Recorded (path, lba, length) of every directory below the root and every file
    pub extents: Vec<(String, u32, u32)>,
}

impl BuiltIso {
    pub fn extent(&self, path: &str) -> (u32, u32) {
        self.extents
            .iter()
            .find(|(p, _, _)| p == path)
            .map(|&(_, lba, len)| (lba, len))
            .unwrap_or_else(|| panic!("no extent for {path}"))
    }

    /// Byte offset in `data` of a recorded sector address
    pub fn sector_offset(&self, recorded: u32) -> usize {
        (i64::from(recorded) + self.shift) as usize * SECTOR
    }

    /// Byte offset in `data` of the record for `name` in the directory at `dir_lba`
    pub fn record_offset(&self, dir_lba: u32, name: &str) -> usize {
        let start = self.sector_offset(dir_lba);
        let mut offset = 0;
        while offset < SECTOR {
            let at = start + offset;
            let len = usize::from(self.data[at]);
            assert!(len != 0, "no record named {name}");
            let name_len = usize::from(self.data[at + 32]);
            if &self.data[at + 33..at + 33 + name_len] == name.as_bytes() {
                return at;
            }
            offset += len;
        }
        panic!("no record named {name}");
    }

    /// Point an existing record at another extent
    pub fn retarget(&mut self, record: usize, lba: u32, len: u32) {
        write_both_endian_u32(&mut self.data[record + 2..record + 10], lba);
        write_both_endian_u32(&mut self.data[record + 10..record + 18], len);
    }

    fn logical_mut(&mut self, lba: usize) -> &mut [u8] {
        &mut self.data[lba * SECTOR..(lba + 1) * SECTOR]
    }

    fn recorded_mut(&mut self, recorded: u32) -> &mut [u8] {
        let start = self.sector_offset(recorded);
        &mut self.data[start..start + SECTOR]
    }

    /// Wrap every sector in 2352-byte CD framing with the payload at `payload_offset`
    pub fn framed(&self, payload_offset: usize) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.data.len() / SECTOR * RAW_SECTOR);
        for sector in self.data.chunks(SECTOR) {
            let mut frame = [0u8; RAW_SECTOR];
            frame[1..11].fill(0xFF);
            frame[15] = if payload_offset == 24 { 2 } else { 1 };
            frame[payload_offset..payload_offset + SECTOR].copy_from_slice(sector);
            raw.extend_from_slice(&frame);
        }
        raw
    }

    pub fn reader(&self) -> ImageReader<Cursor<Vec<u8>>> {
        ImageReader::new(Cursor::new(self.data.clone()))
    }

    pub fn device(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.data.clone())
    }
}

fn record_len(name_len: usize, xa: bool) -> usize {
    33 + name_len + usize::from(name_len % 2 == 0) + if xa { 14 } else { 0 }
}

/// Place records into sectors without straddling; returns (sector, offset) per record
fn pack(lens: &[usize]) -> (Vec<(u32, usize)>, u32) {
    let mut sector = 0;
    let mut offset = 0;
    let mut positions = Vec::with_capacity(lens.len());
    for &len in lens {
        if offset + len > SECTOR {
            sector += 1;
            offset = 0;
        }
        positions.push((sector, offset));
        offset += len;
    }
    (positions, sector + 1)
}

fn encode_record(lba: u32, len: u32, flags: u8, name: &[u8], xa: Option<u16>) -> Vec<u8> {
    let mut record = vec![0u8; record_len(name.len(), xa.is_some())];
    record[0] = record.len() as u8;
    write_both_endian_u32(&mut record[2..10], lba);
    write_both_endian_u32(&mut record[10..18], len);
    record[25] = flags;
    write_both_endian_u16(&mut record[28..32], 1);
    record[32] = name.len() as u8;
    record[33..33 + name.len()].copy_from_slice(name);
    if let Some(attributes) = xa {
        let su = record.len() - 14;
        record[su + 4..su + 6].copy_from_slice(&attributes.to_be_bytes());
        record[su + 6..su + 8].copy_from_slice(b"XA");
    }
    record
}

fn write_descriptor_header(sector: &mut [u8], type_code: u8) {
    sector[0] = type_code;
    sector[1..6].copy_from_slice(b"CD001");
    sector[6] = 1;
}

fn write_padded(dst: &mut [u8], text: &str) {
    dst.fill(b' ');
    dst[..text.len()].copy_from_slice(text.as_bytes());
}

fn write_both_endian_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

fn write_both_endian_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
