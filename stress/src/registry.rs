use dictstress::{Implementation, Snapshot};
use pydict::{AlmostPythonDict, Dict32, Obj, PyDictModel};

pub type Table = Box<dyn PyDictModel>;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImplName {
    #[value(name = "dict32")]
    Dict32,
    #[value(name = "almost_python_dict_recycling")]
    AlmostPythonDictRecycling,
    #[value(name = "almost_python_dict_no_recycling")]
    AlmostPythonDictNoRecycling,
}

impl ImplName {
    pub fn implementation(self) -> Implementation<Obj, Obj, Table> {
        match self {
            ImplName::Dict32 => Implementation {
                name: "dict32",
                factory: dict32,
                dumper: dump_table,
            },
            ImplName::AlmostPythonDictRecycling => Implementation {
                name: "almost_python_dict_recycling",
                factory: almost_recycling,
                dumper: dump_table,
            },
            ImplName::AlmostPythonDictNoRecycling => Implementation {
                name: "almost_python_dict_no_recycling",
                factory: almost_no_recycling,
                dumper: dump_table,
            },
        }
    }
}

fn dict32(pairs: &[(Obj, Obj)]) -> Table {
    Box::new(Dict32::from_pairs(pairs))
}

fn almost_recycling(pairs: &[(Obj, Obj)]) -> Table {
    Box::new(AlmostPythonDict::from_pairs(true, pairs))
}

fn almost_no_recycling(pairs: &[(Obj, Obj)]) -> Table {
    Box::new(AlmostPythonDict::from_pairs(false, pairs))
}

fn dump_table(table: &Table) -> Snapshot<Obj, Obj> {
    pydict::dump(table.as_ref())
}
